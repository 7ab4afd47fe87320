//! End-to-end menu and access scenarios over the JSON fixtures

use authority_policy::{
    evaluate_menu, is_valid_menu, parse_policy_array, AccessRequest, Authority, AuthorityError,
    MenuSpec, PrincipalGrantSet,
};

const MENU_SPEC: &str = include_str!("fixtures/menu_spec.json");
const POLICIES: &str = include_str!("fixtures/policies.json");

fn menu_spec() -> MenuSpec {
    MenuSpec::from_json(MENU_SPEC.as_bytes()).expect("fixture menu spec is valid")
}

fn hr_manager() -> Authority {
    let policies = parse_policy_array(POLICIES.as_bytes()).expect("fixture policies decode");
    Authority::new(policies).with_user_document(r#"{ "employee": { "company_id": "c-42" } }"#)
}

#[test]
fn employee_menu_visible_with_one_action_per_resource() {
    let grants = PrincipalGrantSet::from_pairs([
        ("res:::employee", "act:::employee:read"),
        ("res:::employee:biometric", "act:::employee:biometric:list"),
    ]);
    assert!(is_valid_menu(&grants, &menu_spec(), "menu:::employee").unwrap());
}

#[test]
fn employee_menu_hidden_without_biometric_grant() {
    let grants = PrincipalGrantSet::from_pairs([("res:::employee", "act:::employee:read")]);
    assert!(!is_valid_menu(&grants, &menu_spec(), "menu:::employee").unwrap());

    let evaluation = evaluate_menu(&grants, &menu_spec(), "menu:::employee").unwrap();
    assert!(!evaluation.allowed);
    assert_eq!(evaluation.unsatisfied_clauses.len(), 1);
    assert_eq!(
        evaluation.unsatisfied_clauses[0].resource,
        "res:::employee:biometric"
    );
}

#[test]
fn any_single_action_satisfies_a_clause() {
    let spec = menu_spec();
    for action in [
        "act:::employee:list",
        "act:::employee:read",
        "act:::employee:update",
        "act:::employee:delete",
    ] {
        let grants = PrincipalGrantSet::from_pairs([
            ("res:::employee", action),
            ("res:::employee:biometric", "act:::employee:biometric:read"),
        ]);
        assert!(
            is_valid_menu(&grants, &spec, "menu:::employee").unwrap(),
            "{action} should satisfy the employee clause"
        );
    }
}

#[test]
fn empty_grants_never_see_a_menu() {
    let spec = menu_spec();
    let grants = PrincipalGrantSet::new();
    for key in spec.keys() {
        assert!(!is_valid_menu(&grants, &spec, key).unwrap(), "{key}");
    }
}

#[test]
fn unknown_menu_key_is_a_configuration_error() {
    let grants = PrincipalGrantSet::from_pairs([("res:::employee", "act:::employee:read")]);
    let err = is_valid_menu(&grants, &menu_spec(), "no_such_key").unwrap_err();
    assert!(matches!(err, AuthorityError::Config { .. }));
    assert!(err.to_string().contains("no_such_key"));
}

#[test]
fn authority_answers_menu_from_policies() {
    let authority = hr_manager();
    let spec = menu_spec();

    assert!(authority.is_valid_menu(&spec, "menu:::employee").unwrap());
    // approve is conditional on the timesheet's company, which a menu check cannot supply
    assert!(!authority.is_valid_menu(&spec, "menu:::timesheet").unwrap());
}

#[test]
fn authority_applies_conditions_to_access_requests() {
    let authority = hr_manager();

    let own_company = AccessRequest::new("res:::timesheet", "act:::timesheet:approve")
        .with_string("prop:::timesheet:company_id", "c-42");
    let other_company = AccessRequest::new("res:::timesheet", "act:::timesheet:approve")
        .with_string("prop:::timesheet:company_id", "c-7");
    assert!(authority.is_access_allowed(&own_company).unwrap());
    assert!(!authority.is_access_allowed(&other_company).unwrap());

    let eu_biometrics =
        AccessRequest::new("res:::employee:biometric", "act:::employee:biometric:list")
            .with_string("prop:::employee:region", "eu");
    let us_biometrics =
        AccessRequest::new("res:::employee:biometric", "act:::employee:biometric:list")
            .with_string("prop:::employee:region", "us");
    assert!(!authority.is_access_allowed(&eu_biometrics).unwrap());
    assert!(authority.is_access_allowed(&us_biometrics).unwrap());
}

#[test]
fn session_grant_set_from_policies() {
    let authority = hr_manager();
    let grants = authority.grant_set().unwrap();

    assert!(grants.contains("res:::employee", "act:::employee:list"));
    assert!(grants.contains("res:::employee:biometric", "act:::employee:biometric:list"));
    assert!(!grants.contains("res:::timesheet", "act:::timesheet:approve"));
    assert_eq!(grants.len(), 3);

    let spec = menu_spec();
    assert!(is_valid_menu(&grants, &spec, "menu:::employee").unwrap());
    assert!(!is_valid_menu(&grants, &spec, "menu:::timesheet").unwrap());
}

#[test]
fn menu_spec_round_trips_through_wire_format() {
    let spec = menu_spec();
    let encoded = spec.to_json().unwrap();
    let decoded = MenuSpec::from_json(&encoded).unwrap();
    assert_eq!(decoded, spec);

    let original: serde_json::Value = serde_json::from_str(MENU_SPEC).unwrap();
    let reencoded: serde_json::Value = serde_json::from_slice(&encoded).unwrap();
    assert_eq!(original, reencoded);
}
