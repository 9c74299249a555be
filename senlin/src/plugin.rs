//! Senlin client plugin: builds clustering clients for request contexts and
//! classifies their errors.

use crate::{
    api::ClusteringApi,
    client::SenlinClient,
    config::SenlinConfig,
    error::{SenlinError, SenlinResult},
    models::ActionStatus,
};
use async_trait::async_trait;
use heat_common::{ClientPlugin, RequestContext};
use std::{error::Error as StdError, sync::Arc};
use tracing::{debug, info, warn};

/// Client plugin for the clustering service.
#[derive(Debug, Clone, Default)]
pub struct SenlinClientPlugin {
    config: SenlinConfig,
}

fn as_senlin<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a SenlinError> {
    err.downcast_ref::<SenlinError>()
}

impl SenlinClientPlugin {
    /// Create a plugin with the given configuration.
    #[must_use]
    pub const fn new(config: SenlinConfig) -> Self {
        Self { config }
    }

    /// Plugin configuration.
    #[must_use]
    pub const fn config(&self) -> &SenlinConfig {
        &self.config
    }

    /// Clustering client for `ctx`, created on first use.
    ///
    /// # Errors
    ///
    /// Propagates endpoint resolution and client construction errors.
    pub async fn client(&self, ctx: &RequestContext) -> SenlinResult<Arc<dyn ClusteringApi>> {
        ctx.client(self).await
    }

    /// Resolve a profile name or id to its id.
    ///
    /// # Errors
    ///
    /// Propagates the lookup error, including not-found.
    pub async fn get_profile_id(&self, ctx: &RequestContext, name_or_id: &str) -> SenlinResult<String> {
        Ok(self.client(ctx).await?.get_profile(name_or_id).await?.id)
    }

    /// Resolve a cluster name or id to its id.
    ///
    /// # Errors
    ///
    /// Propagates the lookup error, including not-found.
    pub async fn get_cluster_id(&self, ctx: &RequestContext, name_or_id: &str) -> SenlinResult<String> {
        Ok(self.client(ctx).await?.get_cluster(name_or_id).await?.id)
    }

    /// Resolve a policy name or id to its id.
    ///
    /// # Errors
    ///
    /// Propagates the lookup error, including not-found.
    pub async fn get_policy_id(&self, ctx: &RequestContext, name_or_id: &str) -> SenlinResult<String> {
        Ok(self.client(ctx).await?.get_policy(name_or_id).await?.id)
    }

    /// Poll an action once. Returns `true` once it has succeeded and `false`
    /// while it is still in progress.
    ///
    /// # Errors
    ///
    /// Returns [`SenlinError::ActionFailed`] if the action failed, or the
    /// lookup error.
    pub async fn check_action_status(&self, ctx: &RequestContext, action_id: &str) -> SenlinResult<bool> {
        let action = self.client(ctx).await?.get_action(action_id).await?;
        match action.status {
            ActionStatus::Succeeded => Ok(true),
            ActionStatus::Failed => {
                let reason = action.status_reason.unwrap_or_default();
                warn!(action_id, %reason, "Clustering action failed");
                Err(SenlinError::ActionFailed {
                    action_id: action_id.to_string(),
                    reason,
                })
            }
            status => {
                debug!(action_id, ?status, "Clustering action in progress");
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl ClientPlugin for SenlinClientPlugin {
    const NAME: &'static str = "senlin";
    type Client = dyn ClusteringApi;
    type Error = SenlinError;

    async fn create(&self, ctx: &RequestContext) -> SenlinResult<Arc<dyn ClusteringApi>> {
        let endpoint = match &self.config.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => ctx
                .url_for_interface(&self.config.service_type, self.config.interface)?
                .to_string(),
        };
        let client = SenlinClient::new(&self.config, &endpoint, ctx.auth())?;
        info!(%endpoint, project = %ctx.auth().project_id, "Created clustering client");
        Ok(Arc::new(client))
    }

    fn is_not_found(&self, err: &(dyn StdError + 'static)) -> bool {
        as_senlin(err).is_some_and(SenlinError::is_not_found)
    }

    fn is_bad_request(&self, err: &(dyn StdError + 'static)) -> bool {
        as_senlin(err).is_some_and(SenlinError::is_bad_request)
    }

    fn is_conflict(&self, err: &(dyn StdError + 'static)) -> bool {
        as_senlin(err).is_some_and(SenlinError::is_conflict)
    }

    fn is_over_limit(&self, err: &(dyn StdError + 'static)) -> bool {
        as_senlin(err).is_some_and(SenlinError::is_over_limit)
    }
}
