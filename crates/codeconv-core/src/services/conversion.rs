//! Conversion service - converts a line selection through the backend.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use super::error::WorkflowError;
use crate::domain::{ConversionRequest, ConversionResponse, Selection};
use crate::panels::{ApiStatus, CodeConverterPanel};
use crate::ports::ConverterApiPort;
use crate::settings::DEFAULT_TARGET_LANGUAGE;

/// Run a health check and publish the result on the panel.
pub async fn refresh_api_status(api: &dyn ConverterApiPort, panel: &mut CodeConverterPanel) -> bool {
    let healthy = api.check_health().await;
    panel.set_api_status(ApiStatus::from_health(healthy));
    healthy
}

/// Service for converting selected code.
pub struct ConversionService {
    api: Arc<dyn ConverterApiPort>,
    target_language: String,
    source_language: Option<String>,
    vo_path: Option<PathBuf>,
}

impl ConversionService {
    /// Create a new conversion service targeting the default language.
    pub fn new(api: Arc<dyn ConverterApiPort>) -> Self {
        Self {
            api,
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            source_language: None,
            vo_path: None,
        }
    }

    #[must_use]
    pub fn with_target_language(mut self, target_language: impl Into<String>) -> Self {
        self.target_language = target_language.into();
        self
    }

    #[must_use]
    pub fn with_source_language(mut self, source_language: Option<String>) -> Self {
        self.source_language = source_language;
        self
    }

    #[must_use]
    pub fn with_vo_path(mut self, vo_path: Option<PathBuf>) -> Self {
        self.vo_path = vo_path;
        self
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    fn build_request(&self, selection: &Selection) -> ConversionRequest {
        ConversionRequest::new(selection.content.clone(), self.target_language.clone())
            .with_range(selection.start_line, selection.end_line)
            .with_file_path(selection.file_path_string())
            .with_source_language(self.source_language.clone())
            .with_vo_path(
                self.vo_path
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )
    }

    /// Convert `selection` and record it in the panel history.
    ///
    /// The whole file is sent; the backend uses the line range to locate
    /// the region to rewrite.
    pub async fn convert_selection(
        &self,
        panel: &mut CodeConverterPanel,
        selection: Selection,
    ) -> Result<ConversionResponse, WorkflowError> {
        if selection.is_empty() {
            return Err(WorkflowError::EmptySelection);
        }
        if selection.content.trim().is_empty() {
            return Err(WorkflowError::EmptyContent);
        }

        if !refresh_api_status(self.api.as_ref(), panel).await {
            return Err(WorkflowError::ApiUnavailable);
        }

        let request = self.build_request(&selection);
        debug!(
            path = %selection.file_path.display(),
            start = selection.start_line,
            end = selection.end_line,
            "Sending conversion request"
        );
        let response = self.api.convert_code(&request).await?;

        if !response.success {
            return Err(WorkflowError::Rejected(response.message));
        }

        info!(
            path = %selection.file_path.display(),
            seconds = response.processing_time,
            "Conversion completed"
        );
        panel.add_history(&format!(
            "Lines {}-{} → {}",
            selection.start_line, selection.end_line, self.target_language
        ));
        Ok(response)
    }
}
