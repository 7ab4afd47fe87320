//! Menu specs and visibility evaluation

pub mod evaluation;
pub mod spec;
pub mod store;

pub use evaluation::{evaluate_menu, is_valid_menu, MenuEvaluation, PolicyEvaluator};
pub use spec::{MenuRequirement, MenuSpec, ResourceActionClause};
pub use store::MenuSpecStore;
