//! Unified error type for Authority
//!
//! Evaluation itself has exactly one fatal condition (an unknown menu key,
//! reported as `Config`). Everything else here belongs to loading policy
//! documents, menu specs and configuration.

use serde::{Deserialize, Serialize};

/// Unified error type for all Authority operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AuthorityError {
    /// Caller or deployment configuration is wrong (unknown menu key, bad config value)
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration defect
        message: String,
    },

    /// Menu specification failed load-time validation
    #[error("Invalid menu spec: {message}")]
    InvalidSpec {
        /// Error message naming the offending menu entry
        message: String,
    },

    /// Policy document contains an invalid statement
    #[error("Invalid policy: {message}")]
    InvalidPolicy {
        /// Error message describing the invalid statement
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the decode failure
        message: String,
    },

    /// File system error while reading configuration
    #[error("I/O error: {message}")]
    Io {
        /// Error message describing the I/O failure
        message: String,
    },

    /// A validation overrider reported a failure
    #[error("Validation override failed: {message}")]
    Override {
        /// Error message returned by the overrider
        message: String,
    },
}

impl AuthorityError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Configuration error for a menu key the spec does not define
    pub fn unknown_menu(key: &str) -> Self {
        Self::config(format!("unknown menu key: {key}"))
    }

    /// Create an invalid menu spec error
    pub fn invalid_spec(message: impl Into<String>) -> Self {
        Self::InvalidSpec {
            message: message.into(),
        }
    }

    /// Create an invalid policy error
    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create an override error
    pub fn overridden(message: impl Into<String>) -> Self {
        Self::Override {
            message: message.into(),
        }
    }

    /// Whether this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Standard Result type for Authority operations
pub type Result<T> = std::result::Result<T, AuthorityError>;

impl From<serde_json::Error> for AuthorityError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for AuthorityError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<std::io::Error> for AuthorityError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_menu_is_config_error() {
        let err = AuthorityError::unknown_menu("menu:::payroll");
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown menu key: menu:::payroll"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AuthorityError::from(json_err);
        assert!(matches!(err, AuthorityError::Serialization { .. }));
        assert!(!err.is_config());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
        let err = AuthorityError::from(io_err);
        assert!(matches!(err, AuthorityError::Io { .. }));
    }
}
