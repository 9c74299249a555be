//! Request context fixtures and sample catalog data.

use heat_common::{AuthContext, RequestContext};
use uuid::Uuid;

/// Endpoint registered for the clustering service in [`dummy_context`].
pub const CLUSTERING_ENDPOINT: &str = "http://senlin.example.com:8778";

/// Profile types advertised by a stock clustering service.
pub const SAMPLE_PROFILE_TYPES: [&str; 2] = ["os.heat.stack-1.0", "os.nova.server-1.0"];

/// Policy types advertised by a stock clustering service.
pub const SAMPLE_POLICY_TYPES: [&str; 2] =
    ["senlin.policy.deletion-1.0", "senlin.policy.loadbalance-1.0"];

/// Credentials for the test user and project.
#[must_use]
pub fn dummy_auth() -> AuthContext {
    AuthContext::new("abcd1234", "test_tenant_id", "test_user_id")
        .with_region("RegionOne")
        .with_auth_url("http://keystone.example.com:5000/v3")
}

/// A context whose catalog points the clustering service at
/// [`CLUSTERING_ENDPOINT`].
#[must_use]
pub fn dummy_context() -> RequestContext {
    context_with_clustering_endpoint(CLUSTERING_ENDPOINT)
}

/// A context whose catalog points the clustering service at `endpoint`.
#[must_use]
pub fn context_with_clustering_endpoint(endpoint: &str) -> RequestContext {
    RequestContext::new(dummy_auth()).with_endpoint("clustering", endpoint)
}

/// A context with an empty service catalog.
#[must_use]
pub fn context_without_catalog() -> RequestContext {
    RequestContext::new(dummy_auth())
}

/// A fresh resource id in the service's UUID format.
#[must_use]
pub fn random_resource_id() -> String {
    Uuid::new_v4().to_string()
}
