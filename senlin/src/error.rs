//! Senlin error types with HTTP status classification.

use heat_common::PlatformError;
use thiserror::Error;

/// Errors raised by the clustering client and plugin.
#[derive(Error, Debug)]
pub enum SenlinError {
    /// The service answered 404 for the requested resource
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Any other HTTP error response. The status is absent when the error
    /// was raised without one.
    #[error("{}", describe_http(.status, .message))]
    Http {
        /// HTTP status code, if known
        status: Option<u16>,
        /// Message from the service error body
        message: String,
    },

    /// Request could not be sent or the response could not be read
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A clustering action finished in the FAILED state
    #[error("Action {action_id} failed: {reason}")]
    ActionFailed {
        /// Action identifier
        action_id: String,
        /// Status reason reported by the service
        reason: String,
    },

    /// Engine error, e.g. a missing catalog entry
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

fn describe_http(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("HTTP {status}: {message}"),
        None => format!("HTTP error: {message}"),
    }
}

/// Result type for Senlin operations.
pub type SenlinResult<T> = Result<T, SenlinError>;

impl SenlinError {
    /// Create a not-found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// Create an HTTP error with a status code.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create an HTTP error that carries no status code.
    #[must_use]
    pub fn http_message(message: impl Into<String>) -> Self {
        Self::Http {
            status: None,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// HTTP status carried by this error. Not-found always reports 404.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Http { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if the service rejected the request as malformed.
    #[must_use]
    pub const fn is_bad_request(&self) -> bool {
        matches!(self.http_status(), Some(400))
    }

    /// Check if the request conflicts with the resource state.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self.http_status(), Some(409))
    }

    /// Check if a quota or rate limit was exceeded.
    #[must_use]
    pub const fn is_over_limit(&self) -> bool {
        matches!(self.http_status(), Some(413 | 429))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SenlinError::http(400, "bad spec").to_string(),
            "HTTP 400: bad spec"
        );
        assert_eq!(
            SenlinError::http_message("PROFILE_ID").to_string(),
            "HTTP error: PROFILE_ID"
        );
        assert_eq!(
            SenlinError::not_found("PROFILE_ID").to_string(),
            "Resource not found: PROFILE_ID"
        );
    }

    #[test]
    fn test_http_status() {
        assert_eq!(SenlinError::not_found("x").http_status(), Some(404));
        assert_eq!(SenlinError::http(503, "down").http_status(), Some(503));
        assert_eq!(SenlinError::http_message("x").http_status(), None);
        assert_eq!(SenlinError::invalid_config("x").http_status(), None);
    }

    #[test]
    fn test_status_classification() {
        assert!(SenlinError::http(400, "x").is_bad_request());
        assert!(!SenlinError::http(404, "x").is_bad_request());
        assert!(!SenlinError::http_message("x").is_bad_request());
        assert!(!SenlinError::not_found("x").is_bad_request());

        assert!(SenlinError::http(409, "x").is_conflict());
        assert!(SenlinError::http(413, "x").is_over_limit());
        assert!(SenlinError::http(429, "x").is_over_limit());
        assert!(!SenlinError::http(400, "x").is_over_limit());
    }

    #[test]
    fn test_from_platform_error() {
        let err: SenlinError = PlatformError::NotFound("endpoint".to_string()).into();
        assert!(matches!(err, SenlinError::Platform(_)));
        assert!(!err.is_not_found());
    }
}
