//! Capability contract of a clustering service client.

use crate::{
    error::SenlinResult,
    models::{Action, Cluster, Policy, PolicyType, Profile, ProfileType},
};
use async_trait::async_trait;

/// Operations the plugin and its constraints need from the clustering
/// service. Single-item lookups fail with [`crate::SenlinError::NotFound`]
/// when the resource does not exist.
#[async_trait]
pub trait ClusteringApi: Send + Sync {
    /// Fetch a profile by id or name.
    async fn get_profile(&self, id: &str) -> SenlinResult<Profile>;

    /// Fetch a cluster by id or name.
    async fn get_cluster(&self, id: &str) -> SenlinResult<Cluster>;

    /// Fetch a policy by id or name.
    async fn get_policy(&self, id: &str) -> SenlinResult<Policy>;

    /// Fetch an action by id.
    async fn get_action(&self, id: &str) -> SenlinResult<Action>;

    /// List clusters visible to the caller.
    async fn clusters(&self) -> SenlinResult<Vec<Cluster>>;

    /// List the profile types the service supports.
    async fn profile_types(&self) -> SenlinResult<Vec<ProfileType>>;

    /// List the policy types the service supports.
    async fn policy_types(&self) -> SenlinResult<Vec<PolicyType>>;
}
