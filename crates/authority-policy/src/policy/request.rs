//! Access requests

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Typed properties of the resource being accessed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    /// String-valued properties
    #[serde(rename = "String", default)]
    pub string: HashMap<String, String>,
    /// Integer-valued properties
    #[serde(rename = "Integer", default)]
    pub integer: HashMap<String, i64>,
    /// Float-valued properties
    #[serde(rename = "Float", default)]
    pub float: HashMap<String, f64>,
    /// Boolean-valued properties
    #[serde(rename = "Boolean", default)]
    pub boolean: HashMap<String, bool>,
}

/// A principal asking to perform `action` on `resource`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessRequest {
    /// Resource identifier
    #[serde(rename = "Resource")]
    pub resource: String,
    /// Action identifier
    #[serde(rename = "Action")]
    pub action: String,
    /// Resource properties referenced by statement conditions
    #[serde(rename = "Properties", default)]
    pub properties: Properties,
}

impl AccessRequest {
    /// Create a request with no properties
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
            properties: Properties::default(),
        }
    }

    /// Attach a string property
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.string.insert(key.into(), value.into());
        self
    }

    /// Attach an integer property
    pub fn with_integer(mut self, key: impl Into<String>, value: i64) -> Self {
        self.properties.integer.insert(key.into(), value);
        self
    }

    /// Attach a float property
    pub fn with_float(mut self, key: impl Into<String>, value: f64) -> Self {
        self.properties.float.insert(key.into(), value);
        self
    }

    /// Attach a boolean property
    pub fn with_boolean(mut self, key: impl Into<String>, value: bool) -> Self {
        self.properties.boolean.insert(key.into(), value);
        self
    }
}
