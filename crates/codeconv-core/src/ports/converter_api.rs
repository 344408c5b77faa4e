//! Port for the remote conversion backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ConversionRequest, ConversionResponse, MakeVoRequest, MakeVoResponse};

/// Generic failure of a backend call.
///
/// Adapters collapse transport, timeout, status and decoding failures into
/// these two variants; the reason carries the adapter's own message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiPortError {
    #[error("API request failed: {0}")]
    ConvertFailed(String),

    #[error("Make VO API request failed: {0}")]
    MakeVoFailed(String),
}

/// Client-side view of the conversion backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConverterApiPort: Send + Sync {
    /// True iff `/health` answers 200 within the health timeout.
    ///
    /// Never fails: every error maps to `false`.
    async fn check_health(&self) -> bool;

    /// Convert code through `/convert-code`, returning the body verbatim.
    async fn convert_code(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResponse, ApiPortError>;

    /// Generate value objects through `/make-vo`, returning the body verbatim.
    async fn make_vo(&self, request: &MakeVoRequest) -> Result<MakeVoResponse, ApiPortError>;

    /// Base URL the adapter talks to, for display.
    fn endpoint(&self) -> String;
}
