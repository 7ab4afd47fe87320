//! Menu visibility evaluation

use crate::grants::{GrantCheck, PrincipalGrantSet};
use crate::menu::{MenuSpec, ResourceActionClause};
use authority_core::{AuthorityConfig, ClauseMode, Result};

/// Outcome of a menu evaluation, for audit logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEvaluation {
    /// Whether the menu is visible
    pub allowed: bool,

    /// Clauses the principal did not satisfy, in menu spec order
    pub unsatisfied_clauses: Vec<ResourceActionClause>,
}

/// Decides menu visibility from grants and a menu spec
///
/// Stateless apart from the clause combination rule; cheap to copy and safe
/// to share across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyEvaluator {
    mode: ClauseMode,
}

impl PolicyEvaluator {
    /// Create an evaluator with an explicit clause combination rule
    pub fn new(mode: ClauseMode) -> Self {
        Self { mode }
    }

    /// Create an evaluator from configuration
    pub fn from_config(config: &AuthorityConfig) -> Self {
        Self::new(config.menu.clause_mode)
    }

    /// The clause combination rule in use
    pub fn mode(&self) -> ClauseMode {
        self.mode
    }

    /// Whether the principal may see the menu named `key`
    pub fn is_valid_menu<G>(&self, grants: &G, spec: &MenuSpec, key: &str) -> Result<bool>
    where
        G: GrantCheck + ?Sized,
    {
        let requirement = spec.requirement(key).map_err(|err| {
            tracing::warn!(menu = key, "Menu key not present in menu spec");
            err
        })?;

        let allowed = match self.mode {
            ClauseMode::AllOf => {
                let mut all = true;
                for clause in &requirement.clauses {
                    if !clause_satisfied(grants, clause)? {
                        all = false;
                        break;
                    }
                }
                all
            }
            ClauseMode::AnyOf => {
                let mut any = false;
                for clause in &requirement.clauses {
                    if clause_satisfied(grants, clause)? {
                        any = true;
                        break;
                    }
                }
                any
            }
        };

        tracing::debug!(menu = key, allowed, mode = ?self.mode, "Evaluated menu");
        Ok(allowed)
    }

    /// Like `is_valid_menu`, also reporting every unsatisfied clause
    pub fn evaluate_menu<G>(&self, grants: &G, spec: &MenuSpec, key: &str) -> Result<MenuEvaluation>
    where
        G: GrantCheck + ?Sized,
    {
        let requirement = spec.requirement(key).map_err(|err| {
            tracing::warn!(menu = key, "Menu key not present in menu spec");
            err
        })?;

        let mut unsatisfied_clauses = Vec::new();
        for clause in &requirement.clauses {
            if !clause_satisfied(grants, clause)? {
                unsatisfied_clauses.push(clause.clone());
            }
        }

        let allowed = match self.mode {
            ClauseMode::AllOf => unsatisfied_clauses.is_empty(),
            ClauseMode::AnyOf => unsatisfied_clauses.len() < requirement.clauses.len(),
        };

        tracing::debug!(
            menu = key,
            allowed,
            unsatisfied = unsatisfied_clauses.len(),
            "Evaluated menu with diagnostics"
        );
        Ok(MenuEvaluation {
            allowed,
            unsatisfied_clauses,
        })
    }
}

/// A clause holds when any one of its actions is granted on its resource
///
/// An empty action list can never be satisfied.
fn clause_satisfied<G>(grants: &G, clause: &ResourceActionClause) -> Result<bool>
where
    G: GrantCheck + ?Sized,
{
    for action in &clause.actions {
        if grants.holds(&clause.resource, action)? {
            tracing::trace!(resource = %clause.resource, %action, "Clause satisfied");
            return Ok(true);
        }
    }
    tracing::trace!(resource = %clause.resource, "Clause not satisfied");
    Ok(false)
}

/// Whether `grants` may see the menu `key`, with the default evaluator
pub fn is_valid_menu(grants: &PrincipalGrantSet, spec: &MenuSpec, key: &str) -> Result<bool> {
    PolicyEvaluator::default().is_valid_menu(grants, spec, key)
}

/// Evaluate the menu `key` with diagnostics, with the default evaluator
pub fn evaluate_menu(
    grants: &PrincipalGrantSet,
    spec: &MenuSpec,
    key: &str,
) -> Result<MenuEvaluation> {
    PolicyEvaluator::default().evaluate_menu(grants, spec, key)
}
