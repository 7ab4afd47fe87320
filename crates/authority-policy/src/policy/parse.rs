//! Policy document decoding

use crate::policy::Policy;
use authority_core::Result;

/// Decode a single policy document
pub fn parse_policy(bytes: &[u8]) -> Result<Policy> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decode an array of policy documents; empty input yields no policies
pub fn parse_policy_array(bytes: &[u8]) -> Result<Vec<Policy>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Effect;
    use authority_core::AuthorityError;

    const POLICY_FULL: &str = r#"{
        "Version": 1,
        "PolicyID": "policy-full",
        "Statements": [
            {
                "Effect": "Allow",
                "Resource": "res:::resource_1",
                "Actions": ["act:::resource_1:read"],
                "Conditions": {
                    "AtLeastOne": {
                        "prop:::resource_1:prop_1": { "StringEqual": "hello" }
                    }
                }
            },
            {
                "Effect": "Deny",
                "Resource": "res:::resource_1",
                "Actions": ["act:::resource_1:delete"],
                "Conditions": {
                    "AtLeastOne": {
                        "prop:::resource_1:prop_1": { "StringIn": ["a", "b"] },
                        "prop:::resource_1:prop_2": { "IntegerEqual": 3 }
                    },
                    "MustHaveAll": {
                        "prop:::resource_1:prop_3": { "BooleanEqual": true },
                        "prop:::resource_1:prop_4": { "UserPropEqual": "user:::employee:id" }
                    }
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_full_policy() {
        let policy = parse_policy(POLICY_FULL.as_bytes()).unwrap();

        assert_eq!(policy.version, 1);
        assert_eq!(policy.policy_id, "policy-full");
        assert_eq!(policy.statements.len(), 2);
        assert_eq!(policy.statements[0].effect, Effect::Allow);
        assert_eq!(policy.statements[1].effect, Effect::Deny);

        let first = policy.statements[0].conditions.as_ref().unwrap();
        let hello = &first.at_least_one.as_ref().unwrap()["prop:::resource_1:prop_1"];
        assert_eq!(hello.string_equal.as_deref(), Some("hello"));

        let second = policy.statements[1].conditions.as_ref().unwrap();
        assert_eq!(second.at_least_one.as_ref().unwrap().len(), 2);
        assert_eq!(second.must_have_all.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_policy_without_conditions() {
        let doc = r#"{ "Version": 1, "PolicyID": "p", "Statements": [
            { "Effect": "Allow", "Resource": "r", "Actions": ["a"] }
        ] }"#;
        let policy = parse_policy(doc.as_bytes()).unwrap();
        assert_eq!(policy.statements.len(), 1);
        assert!(policy.statements[0].conditions.is_none());
    }

    #[test]
    fn test_parse_keeps_unknown_effect_for_validation() {
        let doc = r#"{ "Statements": [ { "Effect": "Audit", "Resource": "r", "Actions": [] } ] }"#;
        let policy = parse_policy(doc.as_bytes()).unwrap();
        assert_eq!(policy.statements[0].effect, Effect::Unknown("Audit".to_string()));
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_parse_policy_array() {
        let doc = format!("[{POLICY_FULL}, {POLICY_FULL}]");
        let policies = parse_policy_array(doc.as_bytes()).unwrap();
        assert_eq!(policies.len(), 2);
        assert_eq!(policies[1].statements[1].effect, Effect::Deny);
    }

    #[test]
    fn test_parse_empty_array_input() {
        assert!(parse_policy_array(b"").unwrap().is_empty());
        assert!(parse_policy_array(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_policy(b"{ \"Statements\": 5 }"),
            Err(AuthorityError::Serialization { .. })
        ));
    }

    #[test]
    fn test_encode_round_trip() {
        let policy = parse_policy(POLICY_FULL.as_bytes()).unwrap();
        let encoded = serde_json::to_vec(&policy).unwrap();
        assert_eq!(parse_policy(&encoded).unwrap(), policy);
    }
}
