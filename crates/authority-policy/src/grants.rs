//! Principal grants
//!
//! A grant is one (resource, action) permission held by a principal. The
//! menu evaluator only asks one question of whatever holds the grants,
//! `holds(resource, action)`, so it is expressed as the `GrantCheck` trait.

use crate::policy::{AccessValidator, Effect, Policy};
use authority_core::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One permission held by a principal
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Grant {
    /// Resource identifier, e.g. `res:::employee`
    pub resource: String,
    /// Action identifier, e.g. `act:::employee:read`
    pub action: String,
}

impl Grant {
    /// Create a grant
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }
}

/// Source of truth for whether a principal holds an action on a resource
pub trait GrantCheck {
    /// Whether `action` on `resource` is granted
    fn holds(&self, resource: &str, action: &str) -> Result<bool>;
}

/// The effective grants of one principal for one session
///
/// Indexed by resource so lookups by borrowed strings need no allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrincipalGrantSet {
    by_resource: BTreeMap<String, BTreeSet<String>>,
}

impl PrincipalGrantSet {
    /// Create an empty grant set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grant set from (resource, action) pairs
    pub fn from_pairs<R, A>(pairs: impl IntoIterator<Item = (R, A)>) -> Self
    where
        R: Into<String>,
        A: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(resource, action)| Grant::new(resource, action))
            .collect()
    }

    /// Derive the grants a set of policies confers without request properties
    ///
    /// Each action named by an `Allow` statement is kept when the policies
    /// allow it for a request that carries no properties, so the set agrees
    /// with asking the policies directly. Conditions see their properties'
    /// zero values.
    pub fn from_policies(policies: &[Policy]) -> Result<Self> {
        Self::from_validator(&AccessValidator::new(policies))
    }

    /// Like `from_policies`, through a configured validator
    pub fn from_validator(validator: &AccessValidator<'_>) -> Result<Self> {
        let validator = validator.prevalidated()?;
        let mut grants = Self::new();

        for statement in validator.statements() {
            if statement.effect != Effect::Allow {
                continue;
            }
            for action in &statement.actions {
                if grants.contains(&statement.resource, action) {
                    continue;
                }
                if validator.holds(&statement.resource, action)? {
                    grants.insert(Grant::new(statement.resource.as_str(), action.as_str()));
                } else {
                    tracing::debug!(
                        resource = %statement.resource,
                        action = %action,
                        "Allowed action not in effect without request properties"
                    );
                }
            }
        }
        Ok(grants)
    }

    /// Add a grant
    pub fn insert(&mut self, grant: Grant) -> bool {
        self.by_resource
            .entry(grant.resource)
            .or_default()
            .insert(grant.action)
    }

    /// Remove a grant, returning whether it was present
    pub fn remove(&mut self, resource: &str, action: &str) -> bool {
        let Some(actions) = self.by_resource.get_mut(resource) else {
            return false;
        };
        let removed = actions.remove(action);
        if actions.is_empty() {
            self.by_resource.remove(resource);
        }
        removed
    }

    /// Whether the principal holds `action` on `resource`
    pub fn contains(&self, resource: &str, action: &str) -> bool {
        self.by_resource
            .get(resource)
            .is_some_and(|actions| actions.contains(action))
    }

    /// Number of grants
    pub fn len(&self) -> usize {
        self.by_resource.values().map(BTreeSet::len).sum()
    }

    /// Whether no grants are held
    pub fn is_empty(&self) -> bool {
        self.by_resource.is_empty()
    }

    /// Iterate grants in (resource, action) order
    pub fn iter(&self) -> impl Iterator<Item = Grant> + '_ {
        self.by_resource.iter().flat_map(|(resource, actions)| {
            actions
                .iter()
                .map(move |action| Grant::new(resource.as_str(), action.as_str()))
        })
    }

    /// Whether every grant in `other` is also held here
    pub fn is_superset_of(&self, other: &PrincipalGrantSet) -> bool {
        other
            .iter()
            .all(|grant| self.contains(&grant.resource, &grant.action))
    }
}

impl GrantCheck for PrincipalGrantSet {
    fn holds(&self, resource: &str, action: &str) -> Result<bool> {
        Ok(self.contains(resource, action))
    }
}

impl FromIterator<Grant> for PrincipalGrantSet {
    fn from_iter<I: IntoIterator<Item = Grant>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Grant> for PrincipalGrantSet {
    fn extend<I: IntoIterator<Item = Grant>>(&mut self, iter: I) {
        for grant in iter {
            self.insert(grant);
        }
    }
}
