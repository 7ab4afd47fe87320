//! Policy documents and statements

use crate::policy::Condition;
use authority_core::{AuthorityError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Statement effect
///
/// Unrecognised strings decode to `Unknown` so a bad statement is reported
/// as an invalid policy at validation time rather than as a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Effect {
    /// Grants the statement's actions
    Allow,
    /// Overrides any matching Allow
    Deny,
    /// Anything else found in a document
    Unknown(String),
}

impl Effect {
    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Effect::Allow => "Allow",
            Effect::Deny => "Deny",
            Effect::Unknown(other) => other,
        }
    }

    /// Placeholder for a statement that names no effect
    fn missing() -> Self {
        Effect::Unknown(String::new())
    }

    /// Whether this is `Allow` or `Deny`
    pub fn is_valid(&self) -> bool {
        !matches!(self, Effect::Unknown(_))
    }
}

impl From<String> for Effect {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Allow" => Effect::Allow,
            "Deny" => Effect::Deny,
            _ => Effect::Unknown(value),
        }
    }
}

impl From<Effect> for String {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One Allow/Deny rule over a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Allow or Deny; absent decodes as an invalid empty effect
    #[serde(rename = "Effect", default = "Effect::missing")]
    pub effect: Effect,
    /// Resource this statement applies to
    #[serde(rename = "Resource", default)]
    pub resource: String,
    /// Actions this statement applies to
    #[serde(rename = "Actions", default)]
    pub actions: Vec<String>,
    /// Optional property conditions; `None` always matches
    #[serde(
        rename = "Conditions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub conditions: Option<Condition>,
}

impl Statement {
    /// Whether this statement names `resource` and lists `action`
    pub fn applies_to(&self, resource: &str, action: &str) -> bool {
        self.resource == resource && self.actions.iter().any(|a| a == action)
    }
}

/// A named, versioned set of statements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Document version
    #[serde(rename = "Version", default)]
    pub version: i64,
    /// Policy identifier
    #[serde(rename = "PolicyID", default)]
    pub policy_id: String,
    /// Statements in document order
    #[serde(rename = "Statements", default)]
    pub statements: Vec<Statement>,
}

impl Policy {
    /// Reject statements whose effect is neither Allow nor Deny
    pub fn validate(&self) -> Result<()> {
        validate_statements(self.statements.iter())
    }
}

pub(crate) fn validate_statements<'a>(
    statements: impl IntoIterator<Item = &'a Statement>,
) -> Result<()> {
    for statement in statements {
        if !statement.effect.is_valid() {
            return Err(AuthorityError::invalid_policy(format!(
                "invalid effect: {}",
                statement.effect
            )));
        }
    }
    Ok(())
}
