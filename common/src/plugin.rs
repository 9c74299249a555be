//! The contract every service client plugin implements.

use crate::{context::RequestContext, error::PlatformError};
use async_trait::async_trait;
use std::{error::Error as StdError, sync::Arc};

/// A plugin that knows how to build a service client for a request context
/// and how to classify that client's errors.
///
/// The classifiers take any error so that engine code can ask them about
/// errors of unknown origin. They must answer `false` for foreign error types.
#[async_trait]
pub trait ClientPlugin: Send + Sync {
    /// Registry key, unique per plugin
    const NAME: &'static str;

    /// Client handle type, usually a trait object
    type Client: ?Sized + Send + Sync + 'static;

    /// Error produced by client construction and client calls
    type Error: StdError + From<PlatformError> + Send + Sync + 'static;

    /// Build a new client for `ctx`.
    async fn create(&self, ctx: &RequestContext) -> Result<Arc<Self::Client>, Self::Error>;

    /// Whether `err` means the requested resource does not exist.
    fn is_not_found(&self, err: &(dyn StdError + 'static)) -> bool;

    /// Whether `err` is an HTTP 400 response.
    fn is_bad_request(&self, _err: &(dyn StdError + 'static)) -> bool {
        false
    }

    /// Whether `err` is an HTTP 409 response.
    fn is_conflict(&self, _err: &(dyn StdError + 'static)) -> bool {
        false
    }

    /// Whether `err` reports an exceeded quota or rate limit.
    fn is_over_limit(&self, _err: &(dyn StdError + 'static)) -> bool {
        false
    }

    /// Turn a not-found failure into `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Any error other than not-found is returned unchanged.
    fn ignore_not_found<T>(&self, result: Result<T, Self::Error>) -> Result<Option<T>, Self::Error>
    where
        Self: Sized,
    {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if self.is_not_found(&err) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
