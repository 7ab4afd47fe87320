//! # Authority Policy
//!
//! Decides what a principal may see and do.
//!
//! Two questions are answered here:
//!
//! - **Menu visibility**: does a principal satisfy a named menu requirement?
//!   A requirement is a list of resource clauses; a clause is satisfied when
//!   the principal holds any one of its actions on its resource, and the
//!   requirement is satisfied when every clause is.
//! - **Resource access**: do the principal's `Allow`/`Deny` statements permit
//!   an action on a resource, given the resource's properties?
//!
//! ## Usage
//!
//! ```rust
//! use authority_policy::{is_valid_menu, MenuSpec, PrincipalGrantSet};
//!
//! let spec = MenuSpec::from_json(br#"{
//!     "menu:::employee": {
//!         "require_resource_policy": [
//!             { "Resource": "res:::employee", "Action": ["act:::employee:read"] }
//!         ]
//!     }
//! }"#).unwrap();
//!
//! let grants = PrincipalGrantSet::from_pairs([("res:::employee", "act:::employee:read")]);
//! assert!(is_valid_menu(&grants, &spec, "menu:::employee").unwrap());
//! assert!(is_valid_menu(&grants, &spec, "menu:::payroll").is_err());
//! ```

#![forbid(unsafe_code)]

pub mod authority;
pub mod grants;
pub mod menu;
pub mod policy;
pub mod user_property;

pub use authority::Authority;
pub use authority_core::{AuthorityConfig, AuthorityError, ClauseMode, Result};
pub use grants::{Grant, GrantCheck, PrincipalGrantSet};
pub use menu::{
    evaluate_menu, is_valid_menu, MenuEvaluation, MenuRequirement, MenuSpec, MenuSpecStore,
    PolicyEvaluator, ResourceActionClause,
};
pub use policy::{
    parse_policy, parse_policy_array, AccessRequest, AccessValidator, Comparator, Condition,
    Effect, Policy, Properties, Statement, ValidationOverrider,
};
pub use user_property::{JsonUserProperties, UserPropertyGetter};
