//! Custom constraints checked against template property values before
//! deployment, and the registry that resolves them by name.

use crate::{
    context::RequestContext,
    error::{PlatformError, PlatformResult},
};
use async_trait::async_trait;
use std::{collections::HashMap, fmt, sync::Arc};
use thiserror::Error;
use tracing::debug;

/// Why a value failed a constraint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error validating value '{value}': {reason}")]
pub struct ConstraintError {
    /// Name of the failing constraint
    pub constraint: &'static str,
    /// The rejected value
    pub value: String,
    /// Human-readable cause
    pub reason: String,
}

impl ConstraintError {
    /// Create a constraint failure.
    #[must_use]
    pub fn new(constraint: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            constraint,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// A named validation rule. Implementations hold no per-call state and never
/// mutate the context or its clients.
#[async_trait]
pub trait CustomConstraint: Send + Sync {
    /// Name used to reference the constraint from a resource schema.
    fn name(&self) -> &'static str;

    /// Check `value`, reporting why it fails.
    async fn check(&self, value: &str, ctx: &RequestContext) -> Result<(), ConstraintError>;

    /// Whether `value` satisfies the constraint.
    async fn validate(&self, value: &str, ctx: &RequestContext) -> bool {
        self.check(value, ctx).await.is_ok()
    }
}

/// Constraints available to resource schemas, keyed by name.
#[derive(Default, Clone)]
pub struct ConstraintRegistry {
    constraints: HashMap<&'static str, Arc<dyn CustomConstraint>>,
}

impl fmt::Debug for ConstraintRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintRegistry")
            .field("constraints", &self.names())
            .finish()
    }
}

impl ConstraintRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constraint under its own name, replacing any previous one.
    pub fn register<C: CustomConstraint + 'static>(&mut self, constraint: C) {
        let name = constraint.name();
        debug!(constraint = name, "Registering constraint");
        self.constraints.insert(name, Arc::new(constraint));
    }

    /// Look up a constraint by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn CustomConstraint>> {
        self.constraints.get(name).cloned()
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.constraints.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Check `value` against the named constraint.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::InvalidInput`] if no constraint is registered
    /// under `name`.
    pub async fn check(
        &self,
        name: &str,
        value: &str,
        ctx: &RequestContext,
    ) -> PlatformResult<Result<(), ConstraintError>> {
        let constraint = self
            .get(name)
            .ok_or_else(|| PlatformError::invalid_input(format!("unknown constraint '{name}'")))?;
        Ok(constraint.check(value, ctx).await)
    }
}
