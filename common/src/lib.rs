//! Engine-side contracts shared by Heat service client plugins.
//!
//! This crate provides:
//! - A platform error type for catalog, registry and input failures
//! - HTTP client configuration and building
//! - The request context and its per-context client registry
//! - The `ClientPlugin` contract and custom constraint registry
//! - Tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod constraints;
pub mod context;
pub mod error;
pub mod http;
pub mod plugin;
pub mod tracing_config;

pub use constraints::{ConstraintError, ConstraintRegistry, CustomConstraint};
pub use context::{AuthContext, ClientRegistry, Interface, RequestContext};
pub use error::{PlatformError, PlatformResult};
pub use http::{HttpConfig, build_http_client};
pub use plugin::ClientPlugin;
pub use tracing_config::{TracingConfig, init_tracing};
