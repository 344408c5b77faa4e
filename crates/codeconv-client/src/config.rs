//! Client configuration.

use std::time::Duration;

use codeconv_core::Settings;
use url::Url;

use crate::error::{ApiError, ApiResult};

/// Fixed timeout applied to `/health`.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL, always ending in `/` so relative joins keep any path prefix.
    pub base_url: Url,
    /// Timeout for `/convert-code` and `/make-vo`; `None` waits forever.
    pub request_timeout: Option<Duration>,
    pub health_timeout: Duration,
}

impl ApiClientConfig {
    /// Parse `endpoint` with the default timeouts.
    pub fn new(endpoint: &str) -> ApiResult<Self> {
        Ok(Self {
            base_url: parse_base_url(endpoint)?,
            request_timeout: Some(Duration::from_millis(codeconv_core::DEFAULT_TIMEOUT_MS)),
            health_timeout: HEALTH_TIMEOUT,
        })
    }

    pub fn from_settings(settings: &Settings) -> ApiResult<Self> {
        Ok(Self {
            request_timeout: settings.request_timeout(),
            ..Self::new(&settings.api_endpoint)?
        })
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Resolve an endpoint path such as `convert-code` against the base URL.
    pub(crate) fn url_for(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidEndpoint {
                endpoint: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// The base URL without its trailing slash, for display.
    pub fn endpoint(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}

fn parse_base_url(endpoint: &str) -> ApiResult<Url> {
    let invalid = |reason: String| ApiError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let trimmed = endpoint.trim();
    let mut url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
