//! Principal-bound entry point
//!
//! An `Authority` pairs one principal's policies (and optionally their user
//! document) with the evaluators, so a client can ask both "may I do this?"
//! and "may I see this menu?" through one handle.

use crate::grants::{GrantCheck, PrincipalGrantSet};
use crate::menu::{MenuEvaluation, MenuSpec, PolicyEvaluator};
use crate::policy::{AccessRequest, AccessValidator, Policy, ValidationOverrider};
use crate::user_property::{JsonUserProperties, UserPropertyGetter};
use authority_core::{AuthorityConfig, Result};
use std::fmt;
use std::sync::Arc;

/// A principal's policies bound to the evaluators
#[derive(Clone)]
pub struct Authority {
    policies: Vec<Policy>,
    user_properties: Option<Arc<dyn UserPropertyGetter>>,
    overrider: Option<Arc<dyn ValidationOverrider>>,
    config: AuthorityConfig,
    evaluator: PolicyEvaluator,
}

impl Authority {
    /// Bind `policies` with default configuration
    pub fn new(policies: Vec<Policy>) -> Self {
        Self::with_config(policies, AuthorityConfig::default())
    }

    /// Bind `policies` with explicit configuration
    pub fn with_config(policies: Vec<Policy>, config: AuthorityConfig) -> Self {
        Self {
            policies,
            user_properties: None,
            overrider: None,
            evaluator: PolicyEvaluator::from_config(&config),
            config,
        }
    }

    /// Resolve `UserPropEqual` conditions through `getter`
    pub fn with_user_properties(mut self, getter: impl UserPropertyGetter + 'static) -> Self {
        self.user_properties = Some(Arc::new(getter));
        self
    }

    /// Resolve `UserPropEqual` conditions against a JSON user document,
    /// using the configured path syntax
    pub fn with_user_document(self, document: &str) -> Self {
        let getter = JsonUserProperties::from_json_str(document)
            .with_config(self.config.user_properties.clone());
        self.with_user_properties(getter)
    }

    /// Delegate access decisions to `overrider`
    pub fn with_overrider(mut self, overrider: impl ValidationOverrider + 'static) -> Self {
        self.overrider = Some(Arc::new(overrider));
        self
    }

    /// The bound policies
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// The configuration in use
    pub fn config(&self) -> &AuthorityConfig {
        &self.config
    }

    /// Statement validator over the bound policies
    pub fn validator(&self) -> AccessValidator<'_> {
        let mut validator = AccessValidator::new(&self.policies);
        if let Some(getter) = &self.user_properties {
            validator = validator.with_user_properties(getter.as_ref());
        }
        if let Some(overrider) = &self.overrider {
            validator = validator.with_overrider(overrider.as_ref());
        }
        validator
    }

    /// Whether the principal may perform the request
    pub fn is_access_allowed(&self, request: &AccessRequest) -> Result<bool> {
        self.validator().is_access_allowed(request)
    }

    /// Whether the principal may see the menu `key`
    ///
    /// Each clause action is checked against the statements directly, as a
    /// request without properties. Effects are validated once per call.
    pub fn is_valid_menu(&self, spec: &MenuSpec, key: &str) -> Result<bool> {
        self.evaluator.is_valid_menu(&self.validator().prevalidated()?, spec, key)
    }

    /// Menu decision with the unsatisfied clauses
    pub fn evaluate_menu(&self, spec: &MenuSpec, key: &str) -> Result<MenuEvaluation> {
        self.evaluator.evaluate_menu(&self.validator().prevalidated()?, spec, key)
    }

    /// The grants in effect for a request without properties, for
    /// per-session caching
    pub fn grant_set(&self) -> Result<PrincipalGrantSet> {
        PrincipalGrantSet::from_validator(&self.validator())
    }
}

impl GrantCheck for Authority {
    fn holds(&self, resource: &str, action: &str) -> Result<bool> {
        self.validator().holds(resource, action)
    }
}

impl fmt::Debug for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authority")
            .field("policies", &self.policies.len())
            .field("user_properties", &self.user_properties.is_some())
            .field("overrider", &self.overrider.is_some())
            .field("evaluator", &self.evaluator)
            .finish()
    }
}
