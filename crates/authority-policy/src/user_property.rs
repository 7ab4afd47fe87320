//! User property lookup for `UserPropEqual` conditions
//!
//! Paths look like `user:::employee:company:title`: the prefix is stripped
//! and the remaining segments walk nested objects of the user document.

use authority_core::config::UserPropertyConfig;
use serde_json::{Map, Value};

/// Resolves a user property path to its string value
///
/// Unknown paths resolve to the empty string.
pub trait UserPropertyGetter: Send + Sync {
    /// Value at `path`, or `""` when absent
    fn get_user_property(&self, path: &str) -> String;
}

/// `UserPropertyGetter` over a JSON user document
#[derive(Debug, Clone, Default)]
pub struct JsonUserProperties {
    data: Map<String, Value>,
    config: UserPropertyConfig,
}

impl JsonUserProperties {
    /// Wrap an already decoded user document
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            data,
            config: UserPropertyConfig::default(),
        }
    }

    /// Decode a user document
    ///
    /// A document that is not a JSON object yields no properties.
    pub fn from_json_str(document: &str) -> Self {
        if document.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<Map<String, Value>>(document) {
            Ok(data) => Self::new(data),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to parse user data, using empty properties");
                Self::default()
            }
        }
    }

    /// Use a non-default prefix/separator
    pub fn with_config(mut self, config: UserPropertyConfig) -> Self {
        self.config = config;
        self
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        let path = path.trim();
        let path = path.strip_prefix(self.config.prefix.as_str()).unwrap_or(path);
        let mut segments = path.split(self.config.separator.as_str());

        let first = segments.next()?;
        let mut current = self.data.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

impl UserPropertyGetter for JsonUserProperties {
    fn get_user_property(&self, path: &str) -> String {
        match self.lookup(path) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}
