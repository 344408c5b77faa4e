//! Internal error types for backend calls.
//!
//! These errors are internal to `codeconv-client` and are mapped to core
//! port errors at the boundary.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors related to talking to the conversion backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset, and the like.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request did not finish within the configured timeout.
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The backend answered with a non-success status.
    #[error("Server returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// The body could not be decoded into the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL is not usable.
    #[error("Invalid API endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The endpoint as configured
        endpoint: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Longest body excerpt kept in a [`ApiError::Status`].
pub(crate) const MAX_BODY_EXCERPT: usize = 512;

/// Shorten a response body for inclusion in an error message.
pub(crate) fn body_excerpt(body: &str) -> String {
    let body = body.trim();
    if body.len() <= MAX_BODY_EXCERPT {
        return body.to_string();
    }
    let mut end = MAX_BODY_EXCERPT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
