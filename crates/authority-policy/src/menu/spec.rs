//! Menu specification documents
//!
//! Wire shape (field names are part of the contract):
//!
//! ```json
//! { "menu:::employee": { "require_resource_policy": [
//!     { "Resource": "res:::employee", "Action": ["act:::employee:read"] }
//! ] } }
//! ```

use authority_core::{AuthorityError, Result};
use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A resource plus the actions any one of which satisfies it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceActionClause {
    /// Resource identifier
    #[serde(rename = "Resource")]
    pub resource: String,
    /// Acceptable actions, in document order
    #[serde(rename = "Action")]
    pub actions: Vec<String>,
}

impl ResourceActionClause {
    /// Create a clause
    pub fn new<A: Into<String>>(
        resource: impl Into<String>,
        actions: impl IntoIterator<Item = A>,
    ) -> Self {
        Self {
            resource: resource.into(),
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.resource.is_empty() {
            return Err("empty resource".to_string());
        }
        if self.actions.is_empty() {
            return Err(format!("no actions for resource {}", self.resource));
        }
        let mut seen = HashSet::with_capacity(self.actions.len());
        for action in &self.actions {
            if action.is_empty() {
                return Err(format!("empty action for resource {}", self.resource));
            }
            if !seen.insert(action.as_str()) {
                return Err(format!(
                    "duplicate action {action} for resource {}",
                    self.resource
                ));
            }
        }
        Ok(())
    }
}

/// The clauses gating one menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRequirement {
    /// Clauses in document order
    #[serde(rename = "require_resource_policy")]
    pub clauses: Vec<ResourceActionClause>,
}

impl MenuRequirement {
    /// Create a requirement from clauses
    pub fn new(clauses: impl IntoIterator<Item = ResourceActionClause>) -> Self {
        Self {
            clauses: clauses.into_iter().collect(),
        }
    }
}

/// Mapping from menu key to requirement
///
/// Keys keep document order; a key repeated in a document is a decode
/// error. Treated as read-only once handed to an evaluator; use
/// `MenuSpecStore` to swap in a refreshed spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MenuSpec {
    menus: IndexMap<String, MenuRequirement>,
}

impl MenuSpec {
    /// Create an empty spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a menu entry, replacing any previous entry with the same key
    pub fn with_menu(mut self, key: impl Into<String>, requirement: MenuRequirement) -> Self {
        self.menus.insert(key.into(), requirement);
        self
    }

    /// Decode a wire document and validate it
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let spec: Self = serde_json::from_slice(bytes)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Encode to the wire document
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Check the load-time invariants
    ///
    /// Every entry needs at least one clause; every clause needs a resource
    /// and a non-empty list of distinct, non-empty actions.
    pub fn validate(&self) -> Result<()> {
        for (key, requirement) in &self.menus {
            if requirement.clauses.is_empty() {
                return Err(AuthorityError::invalid_spec(format!(
                    "menu {key} has no require_resource_policy clauses"
                )));
            }
            for (index, clause) in requirement.clauses.iter().enumerate() {
                clause.validate().map_err(|reason| {
                    AuthorityError::invalid_spec(format!("menu {key} clause {index}: {reason}"))
                })?;
            }
        }
        Ok(())
    }

    /// Look up a menu entry
    pub fn get(&self, key: &str) -> Option<&MenuRequirement> {
        self.menus.get(key)
    }

    /// Look up a menu entry; an unknown key is a configuration error
    pub fn requirement(&self, key: &str) -> Result<&MenuRequirement> {
        self.get(key).ok_or_else(|| AuthorityError::unknown_menu(key))
    }

    /// Menu keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.menus.keys().map(String::as_str)
    }

    /// Number of menu entries
    pub fn len(&self) -> usize {
        self.menus.len()
    }

    /// Whether the spec defines no menus
    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}

impl FromIterator<(String, MenuRequirement)> for MenuSpec {
    fn from_iter<I: IntoIterator<Item = (String, MenuRequirement)>>(iter: I) -> Self {
        Self {
            menus: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for MenuSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MenuSpecVisitor;

        impl<'de> Visitor<'de> for MenuSpecVisitor {
            type Value = MenuSpec;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of menu keys to requirements")
            }

            fn visit_map<M>(self, mut access: M) -> std::result::Result<MenuSpec, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut menus = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, requirement)) =
                    access.next_entry::<String, MenuRequirement>()?
                {
                    if menus.contains_key(&key) {
                        return Err(de::Error::custom(format_args!("duplicate menu key {key}")));
                    }
                    menus.insert(key, requirement);
                }
                Ok(MenuSpec { menus })
            }
        }

        deserializer.deserialize_map(MenuSpecVisitor)
    }
}
