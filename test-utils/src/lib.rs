//! Shared test utilities for Heat Rust plugins.
//!
//! This crate provides:
//! - Request context fixtures
//! - Sample clustering catalog data
//! - Proptest generators for identifiers and HTTP statuses

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;
