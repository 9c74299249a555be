//! Custom constraints that check clustering identifiers against the service.
//!
//! Lookup constraints (profile, cluster, policy) accept a value when the
//! single-item lookup succeeds. Type constraints (profile type, policy type)
//! accept a value that exactly matches the name of a listed type. Every
//! client error counts as a failed validation; none is propagated.

use crate::{api::ClusteringApi, error::SenlinResult, plugin::SenlinClientPlugin};
use async_trait::async_trait;
use heat_common::{ConstraintError, ConstraintRegistry, CustomConstraint, RequestContext};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
enum Lookup {
    Profile,
    Cluster,
    Policy,
}

impl Lookup {
    async fn fetch(self, client: &dyn ClusteringApi, id: &str) -> SenlinResult<()> {
        match self {
            Self::Profile => client.get_profile(id).await.map(drop),
            Self::Cluster => client.get_cluster(id).await.map(drop),
            Self::Policy => client.get_policy(id).await.map(drop),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Catalog {
    ProfileTypes,
    PolicyTypes,
}

impl Catalog {
    async fn names(self, client: &dyn ClusteringApi) -> SenlinResult<Vec<String>> {
        Ok(match self {
            Self::ProfileTypes => client
                .profile_types()
                .await?
                .into_iter()
                .map(|t| t.name)
                .collect(),
            Self::PolicyTypes => client
                .policy_types()
                .await?
                .into_iter()
                .map(|t| t.name)
                .collect(),
        })
    }

    const fn label(self) -> &'static str {
        match self {
            Self::ProfileTypes => "profile type",
            Self::PolicyTypes => "policy type",
        }
    }
}

async fn check_exists(
    plugin: &SenlinClientPlugin,
    constraint: &'static str,
    lookup: Lookup,
    value: &str,
    ctx: &RequestContext,
) -> Result<(), ConstraintError> {
    let result = match plugin.client(ctx).await {
        Ok(client) => lookup.fetch(client.as_ref(), value).await,
        Err(err) => Err(err),
    };
    result.map_err(|err| {
        debug!(constraint, value, error = %err, "Lookup rejected value");
        ConstraintError::new(constraint, value, err.to_string())
    })
}

async fn check_member(
    plugin: &SenlinClientPlugin,
    constraint: &'static str,
    catalog: Catalog,
    value: &str,
    ctx: &RequestContext,
) -> Result<(), ConstraintError> {
    let names = match plugin.client(ctx).await {
        Ok(client) => catalog.names(client.as_ref()).await,
        Err(err) => Err(err),
    }
    .map_err(|err| {
        debug!(constraint, value, error = %err, "Listing failed");
        ConstraintError::new(constraint, value, err.to_string())
    })?;

    if names.iter().any(|name| name == value) {
        return Ok(());
    }
    debug!(constraint, value, available = names.len(), "No matching type");
    Err(ConstraintError::new(
        constraint,
        value,
        format!(
            "{} '{value}' is not one of: {}",
            catalog.label(),
            names.join(", ")
        ),
    ))
}

/// Accepts the id or name of an existing profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileConstraint {
    plugin: SenlinClientPlugin,
}

impl ProfileConstraint {
    /// Engine name of this constraint.
    pub const NAME: &'static str = "senlin.profile";

    /// Create the constraint with a specific plugin.
    #[must_use]
    pub const fn new(plugin: SenlinClientPlugin) -> Self {
        Self { plugin }
    }
}

#[async_trait]
impl CustomConstraint for ProfileConstraint {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn check(&self, value: &str, ctx: &RequestContext) -> Result<(), ConstraintError> {
        check_exists(&self.plugin, Self::NAME, Lookup::Profile, value, ctx).await
    }
}

/// Accepts the id or name of an existing cluster.
#[derive(Debug, Clone, Default)]
pub struct ClusterConstraint {
    plugin: SenlinClientPlugin,
}

impl ClusterConstraint {
    /// Engine name of this constraint.
    pub const NAME: &'static str = "senlin.cluster";

    /// Create the constraint with a specific plugin.
    #[must_use]
    pub const fn new(plugin: SenlinClientPlugin) -> Self {
        Self { plugin }
    }
}

#[async_trait]
impl CustomConstraint for ClusterConstraint {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn check(&self, value: &str, ctx: &RequestContext) -> Result<(), ConstraintError> {
        check_exists(&self.plugin, Self::NAME, Lookup::Cluster, value, ctx).await
    }
}

/// Accepts the id or name of an existing policy.
#[derive(Debug, Clone, Default)]
pub struct PolicyConstraint {
    plugin: SenlinClientPlugin,
}

impl PolicyConstraint {
    /// Engine name of this constraint.
    pub const NAME: &'static str = "senlin.policy";

    /// Create the constraint with a specific plugin.
    #[must_use]
    pub const fn new(plugin: SenlinClientPlugin) -> Self {
        Self { plugin }
    }
}

#[async_trait]
impl CustomConstraint for PolicyConstraint {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn check(&self, value: &str, ctx: &RequestContext) -> Result<(), ConstraintError> {
        check_exists(&self.plugin, Self::NAME, Lookup::Policy, value, ctx).await
    }
}

/// Accepts a profile type name the service supports, matched exactly.
#[derive(Debug, Clone, Default)]
pub struct ProfileTypeConstraint {
    plugin: SenlinClientPlugin,
}

impl ProfileTypeConstraint {
    /// Engine name of this constraint.
    pub const NAME: &'static str = "senlin.profile_type";

    /// Create the constraint with a specific plugin.
    #[must_use]
    pub const fn new(plugin: SenlinClientPlugin) -> Self {
        Self { plugin }
    }
}

#[async_trait]
impl CustomConstraint for ProfileTypeConstraint {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn check(&self, value: &str, ctx: &RequestContext) -> Result<(), ConstraintError> {
        check_member(&self.plugin, Self::NAME, Catalog::ProfileTypes, value, ctx).await
    }
}

/// Accepts a policy type name the service supports, matched exactly.
#[derive(Debug, Clone, Default)]
pub struct PolicyTypeConstraint {
    plugin: SenlinClientPlugin,
}

impl PolicyTypeConstraint {
    /// Engine name of this constraint.
    pub const NAME: &'static str = "senlin.policy_type";

    /// Create the constraint with a specific plugin.
    #[must_use]
    pub const fn new(plugin: SenlinClientPlugin) -> Self {
        Self { plugin }
    }
}

#[async_trait]
impl CustomConstraint for PolicyTypeConstraint {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn check(&self, value: &str, ctx: &RequestContext) -> Result<(), ConstraintError> {
        check_member(&self.plugin, Self::NAME, Catalog::PolicyTypes, value, ctx).await
    }
}

/// Register every clustering constraint, all sharing `plugin`.
pub fn register_constraints(registry: &mut ConstraintRegistry, plugin: &SenlinClientPlugin) {
    registry.register(ProfileConstraint::new(plugin.clone()));
    registry.register(ClusterConstraint::new(plugin.clone()));
    registry.register(PolicyConstraint::new(plugin.clone()));
    registry.register(ProfileTypeConstraint::new(plugin.clone()));
    registry.register(PolicyTypeConstraint::new(plugin.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Failure, MockClusteringClient};
    use std::sync::Arc;
    use test_utils::{SAMPLE_POLICY_TYPES, SAMPLE_PROFILE_TYPES, dummy_context};

    async fn context_with(client: Arc<MockClusteringClient>) -> RequestContext {
        let ctx = dummy_context();
        ctx.clients().install::<SenlinClientPlugin>(client).await;
        ctx
    }

    #[tokio::test]
    async fn test_profile_validate_true() {
        let ctx = context_with(Arc::new(MockClusteringClient::new().with_profile("PROFILE_ID", "web"))).await;
        assert!(ProfileConstraint::default().validate("PROFILE_ID", &ctx).await);
    }

    #[tokio::test]
    async fn test_profile_validate_false() {
        let ctx = context_with(Arc::new(MockClusteringClient::new().failing_with(Failure::NotFound))).await;
        assert!(!ProfileConstraint::default().validate("PROFILE_ID", &ctx).await);

        let ctx = context_with(Arc::new(MockClusteringClient::new().failing_with(Failure::Http(None)))).await;
        assert!(!ProfileConstraint::default().validate("PROFILE_ID", &ctx).await);
    }

    #[tokio::test]
    async fn test_cluster_validate_true() {
        let ctx = context_with(Arc::new(MockClusteringClient::new().with_cluster("CLUSTER_ID", "web"))).await;
        assert!(ClusterConstraint::default().validate("CLUSTER_ID", &ctx).await);
    }

    #[tokio::test]
    async fn test_cluster_validate_false() {
        let ctx = context_with(Arc::new(MockClusteringClient::new().failing_with(Failure::NotFound))).await;
        assert!(!ClusterConstraint::default().validate("CLUSTER_ID", &ctx).await);

        let ctx = context_with(Arc::new(MockClusteringClient::new().failing_with(Failure::Http(None)))).await;
        assert!(!ClusterConstraint::default().validate("CLUSTER_ID", &ctx).await);
    }

    #[tokio::test]
    async fn test_policy_validate() {
        let ctx = context_with(Arc::new(MockClusteringClient::new().with_policy("POLICY_ID", "del"))).await;
        let constraint = PolicyConstraint::default();
        assert!(constraint.validate("POLICY_ID", &ctx).await);
        assert!(!constraint.validate("OTHER_ID", &ctx).await);
    }

    #[tokio::test]
    async fn test_unknown_ids_rejected() {
        let ctx = context_with(Arc::new(MockClusteringClient::new().with_profile("p-1", "web"))).await;
        let id = test_utils::random_resource_id();
        assert!(!ProfileConstraint::default().validate(&id, &ctx).await);
        assert!(!ClusterConstraint::default().validate(&id, &ctx).await);
        assert!(!PolicyConstraint::default().validate(&id, &ctx).await);
    }

    #[tokio::test]
    async fn test_lookup_failure_message() {
        let ctx = context_with(Arc::new(MockClusteringClient::new())).await;
        let err = ClusterConstraint::default().check("c-9", &ctx).await.unwrap_err();
        assert_eq!(err.constraint, "senlin.cluster");
        assert_eq!(err.to_string(), "Error validating value 'c-9': Resource not found: c-9");
    }

    #[tokio::test]
    async fn test_profile_type_validate() {
        let ctx = context_with(Arc::new(
            MockClusteringClient::new().with_profile_types(&SAMPLE_PROFILE_TYPES),
        ))
        .await;
        let constraint = ProfileTypeConstraint::default();
        assert!(constraint.validate("os.heat.stack-1.0", &ctx).await);
        assert!(!constraint.validate("Invalid_type", &ctx).await);
    }

    #[tokio::test]
    async fn test_policy_type_validate() {
        let ctx = context_with(Arc::new(
            MockClusteringClient::new().with_policy_types(&SAMPLE_POLICY_TYPES),
        ))
        .await;
        let constraint = PolicyTypeConstraint::default();
        assert!(constraint.validate("senlin.policy.deletion-1.0", &ctx).await);
        assert!(!constraint.validate("Invalid_type", &ctx).await);
    }

    #[tokio::test]
    async fn test_type_match_is_exact() {
        let ctx = context_with(Arc::new(
            MockClusteringClient::new().with_profile_types(&SAMPLE_PROFILE_TYPES),
        ))
        .await;
        let constraint = ProfileTypeConstraint::default();
        assert!(!constraint.validate("OS.HEAT.STACK-1.0", &ctx).await);
        assert!(!constraint.validate("os.heat.stack", &ctx).await);
        assert!(!constraint.validate("os.heat.stack-1.0 ", &ctx).await);
        assert!(!constraint.validate("", &ctx).await);
    }

    #[tokio::test]
    async fn test_type_listing_failure_is_false() {
        let ctx = context_with(Arc::new(
            MockClusteringClient::new().failing_with(Failure::Http(Some(500))),
        ))
        .await;
        assert!(!PolicyTypeConstraint::default().validate("senlin.policy.deletion-1.0", &ctx).await);
    }

    #[tokio::test]
    async fn test_listing_is_not_cached_across_calls() {
        let client = Arc::new(MockClusteringClient::new().with_policy_types(&SAMPLE_POLICY_TYPES));
        let ctx = context_with(Arc::clone(&client)).await;
        let constraint = PolicyTypeConstraint::default();

        for _ in 0..3 {
            assert!(constraint.validate("senlin.policy.loadbalance-1.0", &ctx).await);
        }
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn test_missing_endpoint_is_false() {
        let ctx = test_utils::context_without_catalog();
        let plugin = SenlinClientPlugin::new(crate::SenlinConfig::default().without_endpoint());
        assert!(!ProfileConstraint::new(plugin).validate("PROFILE_ID", &ctx).await);
    }

    #[tokio::test]
    async fn test_register_constraints() {
        let mut registry = ConstraintRegistry::new();
        register_constraints(&mut registry, &SenlinClientPlugin::default());
        assert_eq!(
            registry.names(),
            vec![
                "senlin.cluster",
                "senlin.policy",
                "senlin.policy_type",
                "senlin.profile",
                "senlin.profile_type",
            ]
        );

        let ctx = context_with(Arc::new(
            MockClusteringClient::new().with_profile_types(&SAMPLE_PROFILE_TYPES),
        ))
        .await;
        let outcome = registry
            .check("senlin.profile_type", "os.nova.server-1.0", &ctx)
            .await
            .unwrap();
        assert!(outcome.is_ok());
    }
}
