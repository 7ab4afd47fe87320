//! Authority Core - shared foundation for policy evaluation
//!
//! This crate holds the pieces every Authority crate agrees on:
//!
//! - `AuthorityError`: the single error type surfaced by evaluation, loading
//!   and configuration
//! - `AuthorityConfig`: TOML-backed configuration for clause combination and
//!   user-property path parsing
//!
//! It contains no evaluation logic; see `authority-policy` for that.

#![forbid(unsafe_code)]

/// Unified error handling
pub mod errors;

/// Evaluator configuration
pub mod config;

pub use config::{AuthorityConfig, ClauseMode, MenuConfig, UserPropertyConfig};
pub use errors::{AuthorityError, Result};
