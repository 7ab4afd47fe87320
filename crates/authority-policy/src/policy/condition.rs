//! Statement conditions over resource properties

use crate::policy::Properties;
use crate::user_property::UserPropertyGetter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Comparisons against one resource property
///
/// Every field that is set must hold; a comparator with no fields set
/// matches anything. A property the request does not carry compares as its
/// type's zero value (`""`, `0`, `0.0`, `false`), and a missing user
/// property source resolves every path to `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparator {
    /// String property is one of these
    #[serde(rename = "StringIn", default, skip_serializing_if = "Option::is_none")]
    pub string_in: Option<Vec<String>>,
    /// String property equals this
    #[serde(rename = "StringEqual", default, skip_serializing_if = "Option::is_none")]
    pub string_equal: Option<String>,
    /// Integer property is one of these
    #[serde(rename = "IntegerIn", default, skip_serializing_if = "Option::is_none")]
    pub integer_in: Option<Vec<i64>>,
    /// Integer property equals this
    #[serde(rename = "IntegerEqual", default, skip_serializing_if = "Option::is_none")]
    pub integer_equal: Option<i64>,
    /// Float property is one of these
    #[serde(rename = "FloatIn", default, skip_serializing_if = "Option::is_none")]
    pub float_in: Option<Vec<f64>>,
    /// Float property equals this
    #[serde(rename = "FloatEqual", default, skip_serializing_if = "Option::is_none")]
    pub float_equal: Option<f64>,
    /// Boolean property equals this
    #[serde(rename = "BooleanEqual", default, skip_serializing_if = "Option::is_none")]
    pub boolean_equal: Option<bool>,
    /// String property equals the user property at this path
    #[serde(rename = "UserPropEqual", default, skip_serializing_if = "Option::is_none")]
    pub user_prop_equal: Option<String>,
}

impl Comparator {
    /// Whether the property `key` of `properties` satisfies every set field
    pub fn matches(
        &self,
        key: &str,
        properties: &Properties,
        user_properties: Option<&dyn UserPropertyGetter>,
    ) -> bool {
        self.matches_string(key, properties)
            && self.matches_integer(key, properties)
            && self.matches_float(key, properties)
            && self.matches_boolean(key, properties)
            && self.matches_user_property(key, properties, user_properties)
    }

    fn matches_string(&self, key: &str, properties: &Properties) -> bool {
        let value = properties.string.get(key).map_or("", String::as_str);
        if let Some(list) = &self.string_in {
            if !list.iter().any(|candidate| candidate == value) {
                return false;
            }
        }
        if let Some(expected) = &self.string_equal {
            if expected != value {
                return false;
            }
        }
        true
    }

    fn matches_integer(&self, key: &str, properties: &Properties) -> bool {
        let value = properties.integer.get(key).copied().unwrap_or_default();
        if let Some(list) = &self.integer_in {
            if !list.contains(&value) {
                return false;
            }
        }
        if let Some(expected) = self.integer_equal {
            if expected != value {
                return false;
            }
        }
        true
    }

    fn matches_float(&self, key: &str, properties: &Properties) -> bool {
        let value = properties.float.get(key).copied().unwrap_or_default();
        if let Some(list) = &self.float_in {
            if !list.contains(&value) {
                return false;
            }
        }
        if let Some(expected) = self.float_equal {
            if expected != value {
                return false;
            }
        }
        true
    }

    fn matches_boolean(&self, key: &str, properties: &Properties) -> bool {
        match self.boolean_equal {
            Some(expected) => properties.boolean.get(key).copied().unwrap_or_default() == expected,
            None => true,
        }
    }

    fn matches_user_property(
        &self,
        key: &str,
        properties: &Properties,
        user_properties: Option<&dyn UserPropertyGetter>,
    ) -> bool {
        let Some(path) = &self.user_prop_equal else {
            return true;
        };
        let expected = match user_properties {
            Some(getter) => getter.get_user_property(path),
            None => {
                tracing::warn!(
                    property = key,
                    path = %path,
                    "UserPropEqual condition without a user property source"
                );
                String::new()
            }
        };
        expected == properties.string.get(key).map_or("", String::as_str)
    }
}

/// Conditions attached to a statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// At least one comparator must match (ignored when empty)
    #[serde(rename = "AtLeastOne", default, skip_serializing_if = "Option::is_none")]
    pub at_least_one: Option<BTreeMap<String, Comparator>>,
    /// Every comparator must match (ignored when empty)
    #[serde(rename = "MustHaveAll", default, skip_serializing_if = "Option::is_none")]
    pub must_have_all: Option<BTreeMap<String, Comparator>>,
}

impl Condition {
    /// Whether both the AtLeastOne and MustHaveAll groups hold
    pub fn matches(
        &self,
        properties: &Properties,
        user_properties: Option<&dyn UserPropertyGetter>,
    ) -> bool {
        let at_least_one = match &self.at_least_one {
            Some(group) if !group.is_empty() => group
                .iter()
                .any(|(key, cmp)| cmp.matches(key, properties, user_properties)),
            _ => true,
        };
        let must_have_all = match &self.must_have_all {
            Some(group) => group
                .iter()
                .all(|(key, cmp)| cmp.matches(key, properties, user_properties)),
            None => true,
        };
        at_least_one && must_have_all
    }
}
