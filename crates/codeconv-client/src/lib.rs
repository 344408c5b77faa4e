//! HTTP client for the codeconv conversion backend.
//!
//! [`ApiClient`] implements [`codeconv_core::ConverterApiPort`] on top of
//! reqwest. Its own [`ApiError`] is mapped to the core port error at the
//! trait boundary.

#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;

pub use client::ApiClient;
pub use config::{ApiClientConfig, HEALTH_TIMEOUT};
pub use error::{ApiError, ApiResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio as _;
