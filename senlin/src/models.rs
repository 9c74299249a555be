//! Clustering service records and response envelopes.
//!
//! Only `id` (and `status` for actions) is required. Other fields fall back
//! to their defaults when absent or `null`, so any record the service returns
//! for a successful lookup deserializes.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_unbounded<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_else(unbounded))
}

const fn unbounded() -> i64 {
    -1
}

/// A profile: the template used to create cluster nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub profile_type: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// A cluster of nodes built from one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub status_reason: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub desired_capacity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_size: u32,
    /// `-1` means unbounded
    #[serde(default = "unbounded", deserialize_with = "null_as_unbounded")]
    pub max_size: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A policy that can be attached to clusters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub policy_type: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Lifecycle state of an asynchronous clustering action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    Init,
    Waiting,
    WaitingLifecycleCompletion,
    Ready,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    Suspended,
    #[serde(other)]
    Unknown,
}

/// An asynchronous operation executed by the clustering engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Operation name, e.g. `CLUSTER_CREATE`
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: String,
    pub status: ActionStatus,
    #[serde(default)]
    pub status_reason: Option<String>,
}

/// A profile type from the service catalog, e.g. `os.nova.server-1.0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileType {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// A policy type from the service catalog, e.g. `senlin.policy.deletion-1.0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyType {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileBody {
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClusterBody {
    pub cluster: Cluster,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClustersBody {
    pub clusters: Vec<Cluster>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PolicyBody {
    pub policy: Policy,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActionBody {
    pub action: Action,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileTypesBody {
    pub profile_types: Vec<ProfileType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PolicyTypesBody {
    pub policy_types: Vec<PolicyType>,
}

/// Error body returned by the service on failure.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<ErrorDetail>,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Most specific message in the body.
    pub fn message(self) -> Option<String> {
        self.error
            .and_then(|detail| detail.message)
            .or(self.explanation)
            .filter(|m| !m.is_empty())
    }
}
