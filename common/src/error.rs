//! Centralized error types for engine-side plugin code.
//!
//! Plugins convert these into their own error types so that registry and
//! catalog failures flow through a single `?` chain.

use thiserror::Error;

/// Common error type for engine operations.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlatformError {
    /// Create an invalid input error with the given message.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an internal error with the given message.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type for engine operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
