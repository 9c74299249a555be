//! Senlin REST client.

use crate::{
    api::ClusteringApi,
    config::{SenlinConfig, parse_endpoint},
    error::{SenlinError, SenlinResult},
    models::{
        Action, ActionBody, Cluster, ClusterBody, ClustersBody, ErrorBody, Policy, PolicyBody,
        PolicyType, PolicyTypesBody, Profile, ProfileBody, ProfileType, ProfileTypesBody,
    },
};
use async_trait::async_trait;
use heat_common::{AuthContext, build_http_client};
use reqwest::{Client, header::ACCEPT};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
const API_VERSION_HEADER: &str = "OpenStack-API-Version";

/// HTTP client for the clustering API (v1).
pub struct SenlinClient {
    http: Client,
    base: Url,
    token: SecretString,
    api_version: String,
}

impl std::fmt::Debug for SenlinClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SenlinClient")
            .field("base", &self.base.as_str())
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl SenlinClient {
    /// Create a client for `endpoint` that authenticates with the token in
    /// `auth`.
    ///
    /// # Errors
    ///
    /// Returns [`SenlinError::InvalidConfig`] for a bad endpoint or API
    /// version, and [`SenlinError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &SenlinConfig, endpoint: &str, auth: &AuthContext) -> SenlinResult<Self> {
        config.validate()?;
        let base = parse_endpoint(endpoint)?;
        let http = build_http_client(&config.http)?;

        Ok(Self {
            http,
            base,
            token: auth.auth_token.clone(),
            api_version: config.api_version.clone(),
        })
    }

    /// Endpoint the client talks to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.base.as_str()
    }

    fn url(&self, segments: &[&str]) -> SenlinResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| SenlinError::invalid_config("endpoint cannot be a base URL"))?
            .pop_if_empty()
            .push("v1")
            .extend(segments);
        Ok(url)
    }

    #[instrument(skip(self), fields(endpoint = %self.base))]
    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> SenlinResult<T> {
        let url = self.url(segments)?;
        debug!(%url, "Sending request");

        let response = self
            .http
            .get(url)
            .header(AUTH_TOKEN_HEADER, self.token.expose_secret())
            .header(API_VERSION_HEADER, format!("clustering {}", self.api_version))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await?;
            return serde_json::from_slice(&body).map_err(SenlinError::from);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::message)
            .unwrap_or_else(|| {
                if text.is_empty() {
                    status.canonical_reason().unwrap_or_default().to_string()
                } else {
                    text
                }
            });

        if status.as_u16() == 404 {
            debug!(%message, "Resource not found");
            return Err(SenlinError::not_found(message));
        }
        warn!(status = status.as_u16(), %message, "Clustering request failed");
        Err(SenlinError::http(status.as_u16(), message))
    }
}

#[async_trait]
impl ClusteringApi for SenlinClient {
    #[instrument(skip(self))]
    async fn get_profile(&self, id: &str) -> SenlinResult<Profile> {
        let body: ProfileBody = self.get(&["profiles", id]).await?;
        Ok(body.profile)
    }

    #[instrument(skip(self))]
    async fn get_cluster(&self, id: &str) -> SenlinResult<Cluster> {
        let body: ClusterBody = self.get(&["clusters", id]).await?;
        Ok(body.cluster)
    }

    #[instrument(skip(self))]
    async fn get_policy(&self, id: &str) -> SenlinResult<Policy> {
        let body: PolicyBody = self.get(&["policies", id]).await?;
        Ok(body.policy)
    }

    #[instrument(skip(self))]
    async fn get_action(&self, id: &str) -> SenlinResult<Action> {
        let body: ActionBody = self.get(&["actions", id]).await?;
        Ok(body.action)
    }

    async fn clusters(&self) -> SenlinResult<Vec<Cluster>> {
        let body: ClustersBody = self.get(&["clusters"]).await?;
        Ok(body.clusters)
    }

    async fn profile_types(&self) -> SenlinResult<Vec<ProfileType>> {
        let body: ProfileTypesBody = self.get(&["profile-types"]).await?;
        Ok(body.profile_types)
    }

    async fn policy_types(&self) -> SenlinResult<Vec<PolicyType>> {
        let body: PolicyTypesBody = self.get(&["policy-types"]).await?;
        Ok(body.policy_types)
    }
}
