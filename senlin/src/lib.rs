//! Senlin clustering client plugin for the Heat engine.
//!
//! Provides the clustering REST client, the plugin that caches it per
//! request context, HTTP error classification, and the custom constraints
//! that validate profile, cluster, policy, profile type and policy type
//! identifiers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod client;
pub mod config;
pub mod constraints;
pub mod error;
pub mod models;
pub mod plugin;

#[cfg(test)]
mod mock;

pub use api::ClusteringApi;
pub use client::SenlinClient;
pub use config::SenlinConfig;
pub use constraints::{
    ClusterConstraint, PolicyConstraint, PolicyTypeConstraint, ProfileConstraint,
    ProfileTypeConstraint, register_constraints,
};
pub use error::{SenlinError, SenlinResult};
pub use plugin::SenlinClientPlugin;
