//! CLI-specific error types and mappings.
//!
//! Handlers return `anyhow::Result`; at the edge the error chain is
//! classified into a [`CliError`] that decides the process exit code.

use codeconv_client::ApiError;
use codeconv_core::{PathError, SelectionError, SettingsError, WorkflowError};
use codeconv_runtime::ServerError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Generic failure.
    #[error("{0}")]
    General(String),

    /// Invalid arguments or missing inputs.
    #[error("{0}")]
    Usage(String),

    /// The backend is unreachable or failed the request.
    #[error("{0}")]
    Unavailable(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Process execution error.
    #[error("Process error: {0}")]
    Process(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::General(_) => 1,
            Self::Usage(_) => 2,
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
            Self::Process(_) => 71,     // EX_OSERR
        }
    }

    /// Classify an error chain by the first error type recognised in it.
    pub fn classify(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        for cause in err.chain() {
            if let Some(cli) = cause.downcast_ref::<Self>() {
                return Self::reclassify(cli, message);
            }
            if let Some(workflow) = cause.downcast_ref::<WorkflowError>() {
                return if workflow.is_precondition() {
                    Self::Usage(message)
                } else {
                    Self::Unavailable(message)
                };
            }
            if cause.is::<SelectionError>() {
                return Self::Usage(message);
            }
            if cause.is::<SettingsError>() || cause.is::<PathError>() {
                return Self::Config(message);
            }
            if let Some(api) = cause.downcast_ref::<ApiError>() {
                return match api {
                    ApiError::InvalidEndpoint { .. } => Self::Config(message),
                    _ => Self::Unavailable(message),
                };
            }
            if cause.is::<ServerError>() {
                return Self::Process(message);
            }
            if cause.is::<std::io::Error>() {
                return Self::Io(message);
            }
        }
        Self::General(message)
    }

    fn reclassify(cli: &Self, message: String) -> Self {
        match cli {
            Self::General(_) => Self::General(message),
            Self::Usage(_) => Self::Usage(message),
            Self::Unavailable(_) => Self::Unavailable(message),
            Self::Io(_) => Self::Io(message),
            Self::Config(_) => Self::Config(message),
            Self::Process(_) => Self::Process(message),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
