//! Backend process errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from starting the backend.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Server file not found: {0}")]
    EntryPointMissing(PathBuf),

    #[error("No server entry point found under {workspace} (looked for {candidates})")]
    EntryPointNotFound {
        workspace: PathBuf,
        candidates: String,
    },

    #[error("Failed to start server with '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },
}
