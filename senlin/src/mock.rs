//! In-memory clustering client used by unit tests.

use crate::{
    api::ClusteringApi,
    error::{SenlinError, SenlinResult},
    models::{Action, ActionStatus, Cluster, Policy, PolicyType, Profile, ProfileType},
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

/// Failure forced onto every call.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    NotFound,
    Http(Option<u16>),
}

impl Failure {
    fn error(self, what: &str) -> SenlinError {
        match self {
            Self::NotFound => SenlinError::not_found(what),
            Self::Http(Some(status)) => SenlinError::http(status, what),
            Self::Http(None) => SenlinError::http_message(what),
        }
    }
}

#[derive(Debug, Default)]
pub struct MockClusteringClient {
    profiles: HashMap<String, Profile>,
    clusters: Vec<Cluster>,
    policies: HashMap<String, Policy>,
    actions: HashMap<String, Action>,
    profile_types: Vec<ProfileType>,
    policy_types: Vec<PolicyType>,
    failure: Option<Failure>,
    calls: AtomicUsize,
}

impl MockClusteringClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, id: &str, name: &str) -> Self {
        self.profiles.insert(
            id.to_string(),
            Profile {
                id: id.to_string(),
                name: name.to_string(),
                profile_type: "os.nova.server-1.0".to_string(),
                created_at: None,
                metadata: serde_json::Map::new(),
            },
        );
        self
    }

    pub fn with_cluster(mut self, id: &str, name: &str) -> Self {
        self.clusters.push(Cluster {
            id: id.to_string(),
            name: name.to_string(),
            status: "ACTIVE".to_string(),
            status_reason: None,
            profile_id: String::new(),
            desired_capacity: 1,
            min_size: 0,
            max_size: -1,
            created_at: None,
        });
        self
    }

    pub fn with_policy(mut self, id: &str, name: &str) -> Self {
        self.policies.insert(
            id.to_string(),
            Policy {
                id: id.to_string(),
                name: name.to_string(),
                policy_type: "senlin.policy.deletion-1.0".to_string(),
                created_at: None,
            },
        );
        self
    }

    pub fn with_action(mut self, id: &str, status: ActionStatus, reason: Option<&str>) -> Self {
        self.actions.insert(
            id.to_string(),
            Action {
                id: id.to_string(),
                name: format!("cluster_create_{id}"),
                action: "CLUSTER_CREATE".to_string(),
                target: "c-1".to_string(),
                status,
                status_reason: reason.map(String::from),
            },
        );
        self
    }

    pub fn with_profile_types(mut self, names: &[&str]) -> Self {
        self.profile_types = names
            .iter()
            .map(|name| ProfileType {
                name: (*name).to_string(),
                version: None,
            })
            .collect();
        self
    }

    pub fn with_policy_types(mut self, names: &[&str]) -> Self {
        self.policy_types = names
            .iter()
            .map(|name| PolicyType {
                name: (*name).to_string(),
                version: None,
            })
            .collect();
        self
    }

    pub fn failing_with(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self, what: &str) -> SenlinResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.failure.map_or(Ok(()), |failure| Err(failure.error(what)))
    }
}

fn lookup<T: Clone>(items: &HashMap<String, T>, id: &str) -> SenlinResult<T> {
    items
        .get(id)
        .cloned()
        .ok_or_else(|| SenlinError::not_found(id))
}

#[async_trait]
impl ClusteringApi for MockClusteringClient {
    async fn get_profile(&self, id: &str) -> SenlinResult<Profile> {
        self.enter(id)?;
        lookup(&self.profiles, id)
            .or_else(|_| {
                self.profiles
                    .values()
                    .find(|p| p.name == id)
                    .cloned()
                    .ok_or_else(|| SenlinError::not_found(id))
            })
    }

    async fn get_cluster(&self, id: &str) -> SenlinResult<Cluster> {
        self.enter(id)?;
        self.clusters
            .iter()
            .find(|c| c.id == id || c.name == id)
            .cloned()
            .ok_or_else(|| SenlinError::not_found(id))
    }

    async fn get_policy(&self, id: &str) -> SenlinResult<Policy> {
        self.enter(id)?;
        lookup(&self.policies, id)
    }

    async fn get_action(&self, id: &str) -> SenlinResult<Action> {
        self.enter(id)?;
        lookup(&self.actions, id)
    }

    async fn clusters(&self) -> SenlinResult<Vec<Cluster>> {
        self.enter("clusters")?;
        Ok(self.clusters.clone())
    }

    async fn profile_types(&self) -> SenlinResult<Vec<ProfileType>> {
        self.enter("profile-types")?;
        Ok(self.profile_types.clone())
    }

    async fn policy_types(&self) -> SenlinResult<Vec<PolicyType>> {
        self.enter("policy-types")?;
        Ok(self.policy_types.clone())
    }
}
