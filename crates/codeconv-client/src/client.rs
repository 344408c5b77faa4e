//! Reqwest implementation of [`ConverterApiPort`].

use async_trait::async_trait;
use codeconv_core::ports::{ApiPortError, ConverterApiPort};
use codeconv_core::{ConversionRequest, ConversionResponse, MakeVoRequest, MakeVoResponse};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiClientConfig;
use crate::error::{ApiError, ApiResult, body_excerpt};

/// Client for the conversion backend.
///
/// One `reqwest::Client` is shared by all calls; timeouts are applied per
/// request because `/health` and the conversion endpoints use different ones.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiClientConfig,
}

impl ApiClient {
    pub fn new(config: ApiClientConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    pub const fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// `GET /health`, true only for exactly 200.
    pub async fn health(&self) -> bool {
        let url = match self.config.url_for("health") {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "Cannot build health URL");
                return false;
            }
        };

        match self
            .http
            .get(url)
            .timeout(self.config.health_timeout)
            .send()
            .await
        {
            Ok(response) => {
                let healthy = response.status() == StatusCode::OK;
                debug!(status = response.status().as_u16(), healthy, "Health check");
                healthy
            }
            Err(e) => {
                debug!(error = %e, "Health check failed");
                false
            }
        }
    }

    /// POST a JSON body to `path` and decode the response.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: serde::de::DeserializeOwned,
    {
        let url = self.config.url_for(path)?;
        let mut request = self.http.post(url).json(body);
        if let Some(timeout) = self.config.request_timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: detail_or_body(&text),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    fn classify(&self, error: reqwest::Error) -> ApiError {
        match self.config.request_timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Transport(error),
        }
    }

    /// `POST /convert-code`.
    pub async fn convert(&self, request: &ConversionRequest) -> ApiResult<ConversionResponse> {
        debug!(
            target_language = %request.target_language,
            bytes = request.source_code.len(),
            "POST convert-code"
        );
        self.post_json("convert-code", request).await
    }

    /// `POST /make-vo`.
    pub async fn make_vo_request(&self, request: &MakeVoRequest) -> ApiResult<MakeVoResponse> {
        debug!(project = %request.project_path, "POST make-vo");
        self.post_json("make-vo", request).await
    }
}

/// FastAPI reports errors as `{"detail": ...}`; prefer that over the raw body.
fn detail_or_body(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|v| match v.get("detail")? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| body_excerpt(text))
}

#[async_trait]
impl ConverterApiPort for ApiClient {
    async fn check_health(&self) -> bool {
        self.health().await
    }

    async fn convert_code(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResponse, ApiPortError> {
        self.convert(request).await.map_err(|e| {
            warn!(error = %e, "Conversion request failed");
            ApiPortError::ConvertFailed(e.to_string())
        })
    }

    async fn make_vo(&self, request: &MakeVoRequest) -> Result<MakeVoResponse, ApiPortError> {
        self.make_vo_request(request).await.map_err(|e| {
            warn!(error = %e, "Make VO request failed");
            ApiPortError::MakeVoFailed(e.to_string())
        })
    }

    fn endpoint(&self) -> String {
        self.config.endpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_is_preferred() {
        assert_eq!(
            detail_or_body(r#"{"detail": "Project path not found"}"#),
            "Project path not found"
        );
        assert_eq!(
            detail_or_body(r#"{"detail": [{"loc": ["body"]}]}"#),
            r#"[{"loc":["body"]}]"#
        );
        assert_eq!(detail_or_body("Internal Server Error"), "Internal Server Error");
    }

    #[test]
    fn test_unreachable_health_is_false() {
        let config = ApiClientConfig::new("http://127.0.0.1:9")
            .unwrap()
            .with_health_timeout(std::time::Duration::from_millis(500));
        let client = ApiClient::new(config).unwrap();
        assert!(!tokio_test::block_on(client.check_health()));
    }
}
