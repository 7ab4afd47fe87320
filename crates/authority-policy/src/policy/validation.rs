//! Statement evaluation for access requests

use crate::grants::GrantCheck;
use crate::policy::statement::validate_statements;
use crate::policy::{AccessRequest, Effect, Policy, Statement};
use crate::user_property::UserPropertyGetter;
use authority_core::Result;

/// Replaces statement evaluation entirely when installed
///
/// Used by deployments that delegate decisions to another authority while
/// keeping the same call sites.
pub trait ValidationOverrider: Send + Sync {
    /// Decide the request; the policies and user properties are those the
    /// validator would have used
    fn override_validation(
        &self,
        policies: &[Policy],
        user_properties: Option<&dyn UserPropertyGetter>,
        request: &AccessRequest,
    ) -> Result<bool>;
}

/// Evaluates access requests against a principal's policies
///
/// Borrowing view; build one per check or keep it for the lifetime of the
/// borrowed policies.
#[derive(Clone, Copy)]
pub struct AccessValidator<'a> {
    policies: &'a [Policy],
    user_properties: Option<&'a dyn UserPropertyGetter>,
    overrider: Option<&'a dyn ValidationOverrider>,
    prevalidated: bool,
}

impl<'a> AccessValidator<'a> {
    /// Create a validator over `policies`
    pub fn new(policies: &'a [Policy]) -> Self {
        Self {
            policies,
            user_properties: None,
            overrider: None,
            prevalidated: false,
        }
    }

    /// Use `user_properties` for `UserPropEqual` comparisons
    pub fn with_user_properties(mut self, user_properties: &'a dyn UserPropertyGetter) -> Self {
        self.user_properties = Some(user_properties);
        self
    }

    /// Delegate every decision to `overrider`
    pub fn with_overrider(mut self, overrider: &'a dyn ValidationOverrider) -> Self {
        self.overrider = Some(overrider);
        self
    }

    /// Check every statement's effect once, so repeated checks through the
    /// returned validator skip the scan
    ///
    /// With an overrider installed nothing is checked, as the overrider
    /// decides every request.
    pub fn prevalidated(mut self) -> Result<Self> {
        if self.overrider.is_none() && !self.prevalidated {
            validate_statements(self.statements())?;
        }
        self.prevalidated = true;
        Ok(self)
    }

    /// Whether the request is allowed
    ///
    /// 1. No statement names the resource and action with matching
    ///    conditions: denied.
    /// 2. Any matching statement is `Deny`: denied.
    /// 3. Otherwise (all matching statements are `Allow`): allowed.
    ///
    /// Every statement of every policy is checked for a valid effect first,
    /// whether or not it applies to the request, unless the validator was
    /// already `prevalidated`.
    pub fn is_access_allowed(&self, request: &AccessRequest) -> Result<bool> {
        if let Some(overrider) = self.overrider {
            let allowed =
                overrider.override_validation(self.policies, self.user_properties, request)?;
            tracing::debug!(
                resource = %request.resource,
                action = %request.action,
                allowed,
                "Access decided by validation overrider"
            );
            return Ok(allowed);
        }

        if !self.prevalidated {
            validate_statements(self.statements())?;
        }

        let mut matched = 0usize;
        for statement in self.matching_statements(request) {
            if statement.effect == Effect::Deny {
                tracing::debug!(
                    resource = %request.resource,
                    action = %request.action,
                    "Access denied by explicit Deny statement"
                );
                return Ok(false);
            }
            matched += 1;
        }

        let allowed = matched > 0;
        tracing::debug!(
            resource = %request.resource,
            action = %request.action,
            matched,
            allowed,
            "Evaluated access request"
        );
        Ok(allowed)
    }

    pub(crate) fn statements(&self) -> impl Iterator<Item = &'a Statement> {
        let policies: &'a [Policy] = self.policies;
        policies.iter().flat_map(|policy| policy.statements.iter())
    }

    fn matching_statements<'r>(
        &self,
        request: &'r AccessRequest,
    ) -> impl Iterator<Item = &'a Statement> + 'r
    where
        'a: 'r,
    {
        let user_properties = self.user_properties;
        self.statements()
            .filter(move |stmt| stmt.applies_to(&request.resource, &request.action))
            .filter(move |stmt| {
                stmt.conditions
                    .as_ref()
                    .map_or(true, |cond| cond.matches(&request.properties, user_properties))
            })
    }
}

impl GrantCheck for AccessValidator<'_> {
    fn holds(&self, resource: &str, action: &str) -> Result<bool> {
        self.is_access_allowed(&AccessRequest::new(resource, action))
    }
}
