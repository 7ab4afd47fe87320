//! Configuration for the Authority evaluators
//!
//! Loaded from TOML. Every section is optional; missing values fall back to
//! the defaults below.
//!
//! ```toml
//! [menu]
//! clause_mode = "all_of"
//!
//! [user_properties]
//! prefix = "user:::"
//! separator = ":"
//! ```

use crate::{AuthorityError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the clauses of a menu requirement combine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseMode {
    /// Every clause must be satisfied
    #[default]
    AllOf,
    /// Any single satisfied clause is enough
    AnyOf,
}

/// Menu evaluation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Combination rule across clauses
    pub clause_mode: ClauseMode,
}

/// How user-property paths (`user:::employee:company:title`) are parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPropertyConfig {
    /// Prefix stripped from a path before walking the user document
    pub prefix: String,
    /// Separator between path segments
    pub separator: String,
}

impl Default for UserPropertyConfig {
    fn default() -> Self {
        Self {
            prefix: "user:::".to_string(),
            separator: ":".to_string(),
        }
    }
}

/// Top-level Authority configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorityConfig {
    /// Menu evaluation settings
    pub menu: MenuConfig,
    /// User-property path settings
    pub user_properties: UserPropertyConfig,
}

impl AuthorityConfig {
    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AuthorityError::io(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded authority config");
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.user_properties.separator.is_empty() {
            return Err(AuthorityError::config(
                "user_properties.separator must not be empty",
            ));
        }
        Ok(())
    }
}
