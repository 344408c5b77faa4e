//! VO generation service - runs `/make-vo` for the configured project.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use super::error::WorkflowError;
use crate::domain::{MakeVoRequest, MakeVoResponse};
use crate::panels::VoGeneratorPanel;
use crate::ports::ConverterApiPort;
use crate::project::save_vo_file;

/// Result of a successful VO generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct VoOutcome {
    pub vo_code: String,
    pub file_count: u64,
    pub processing_time: f64,
    /// Where the generated class was written, or why writing it failed.
    pub saved_to: Result<PathBuf, String>,
}

/// Service for generating value objects from a whole project.
pub struct VoGenerationService {
    api: Arc<dyn ConverterApiPort>,
}

impl VoGenerationService {
    pub fn new(api: Arc<dyn ConverterApiPort>) -> Self {
        Self { api }
    }

    /// Generate value objects for the panel's project into its output path.
    ///
    /// Missing paths fail before any network call and leave the panel
    /// untouched. Once running, every failure is recorded on the panel.
    pub async fn run(&self, panel: &mut VoGeneratorPanel) -> Result<VoOutcome, WorkflowError> {
        let project = panel
            .project_path()
            .map(PathBuf::from)
            .ok_or(WorkflowError::MissingProjectPath)?;
        if !project.exists() {
            return Err(WorkflowError::ProjectPathNotFound(project));
        }
        let output = panel
            .output_path()
            .map(PathBuf::from)
            .ok_or(WorkflowError::MissingOutputPath)?;

        panel.mark_running();
        match self.generate(&project, &output).await {
            Ok(response) => Ok(Self::finish(panel, &project, &output, response)),
            Err(e) => {
                warn!(project = %project.display(), error = %e, "VO generation failed");
                panel.record_error(&e.to_string());
                Err(e)
            }
        }
    }

    async fn generate(
        &self,
        project: &std::path::Path,
        output: &std::path::Path,
    ) -> Result<MakeVoResponse, WorkflowError> {
        if !self.api.check_health().await {
            return Err(WorkflowError::ApiUnavailable);
        }

        let request = MakeVoRequest::new(
            project.to_string_lossy(),
            Some(output.to_string_lossy().into_owned()),
        );
        let response = self.api.make_vo(&request).await?;
        if response.success {
            Ok(response)
        } else {
            Err(WorkflowError::Rejected(response.message))
        }
    }

    fn finish(
        panel: &mut VoGeneratorPanel,
        project: &std::path::Path,
        output: &std::path::Path,
        response: MakeVoResponse,
    ) -> VoOutcome {
        let summary = format!(
            "VO generated successfully!\nProject: {}\nOutput: {}\nFiles: {}\nTime: {:.2}s",
            project.display(),
            output.display(),
            response.file_count,
            response.processing_time
        );
        panel.record_success(response.file_count, summary);

        let saved_to = save_vo_file(output, project, &response.vo_code).map_err(|e| {
            warn!(output = %output.display(), error = %e, "Failed to save VO file");
            e.to_string()
        });
        info!(
            project = %project.display(),
            files = response.file_count,
            seconds = response.processing_time,
            "VO generation completed"
        );

        VoOutcome {
            vo_code: response.vo_code,
            file_count: response.file_count,
            processing_time: response.processing_time,
            saved_to,
        }
    }
}
