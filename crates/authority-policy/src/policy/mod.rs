//! Allow/Deny statement policies and their evaluation

pub mod condition;
pub mod parse;
pub mod request;
pub mod statement;
pub mod validation;

pub use condition::{Comparator, Condition};
pub use parse::{parse_policy, parse_policy_array};
pub use request::{AccessRequest, Properties};
pub use statement::{Effect, Policy, Statement};
pub use validation::{AccessValidator, ValidationOverrider};
