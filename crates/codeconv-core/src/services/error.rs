//! Workflow error taxonomy.

use std::path::PathBuf;

use thiserror::Error;

use crate::ports::ApiPortError;

/// Errors surfaced to the user by the workflow services.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Please set project path first")]
    MissingProjectPath,

    #[error("Project path does not exist: {0}")]
    ProjectPathNotFound(PathBuf),

    #[error("Please set output path first")]
    MissingOutputPath,

    #[error("LLM API is not available. Please check if the server is running.")]
    ApiUnavailable,

    #[error("Please select the code you want to convert Map to VO")]
    EmptySelection,

    #[error("No file content")]
    EmptyContent,

    /// Transport, timeout, status or decoding failure of a backend call.
    #[error(transparent)]
    Api(#[from] ApiPortError),

    /// The backend answered but reported `success: false`.
    #[error("{0}")]
    Rejected(String),
}

impl WorkflowError {
    /// True for errors raised before any network call.
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingProjectPath
                | Self::ProjectPathNotFound(_)
                | Self::MissingOutputPath
                | Self::EmptySelection
                | Self::EmptyContent
        )
    }
}
