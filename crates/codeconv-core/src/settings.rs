//! Settings domain types and validation.
//!
//! Settings are resolved from a key lookup (the process environment in
//! production, after the CLI has loaded the `.env` file) with fallback
//! defaults. Keeping the lookup injectable lets tests avoid touching the
//! real environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::paths::absolutize;

/// Default base URL of the conversion backend.
pub const DEFAULT_API_ENDPOINT: &str = "http://localhost:8000";

/// Default timeout for conversion and VO requests, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default target language tag sent with `/convert-code`.
pub const DEFAULT_TARGET_LANGUAGE: &str = "#";

/// Log file path relative to the workspace root when none is configured.
pub const DEFAULT_LOG_RELATIVE: &str = "logs/server.log";

/// Environment keys, in the order `config show` prints them.
pub mod keys {
    pub const API_ENDPOINT: &str = "CODECONV_API_ENDPOINT";
    pub const TIMEOUT_MS: &str = "CODECONV_TIMEOUT_MS";
    pub const TARGET_LANGUAGE: &str = "CODECONV_TARGET_LANGUAGE";
    pub const PYTHON: &str = "CODECONV_PYTHON";
    pub const WORKSPACE: &str = "CODECONV_WORKSPACE";
    pub const SERVER_PATH: &str = "CODECONV_SERVER_PATH";
    pub const LOG_PATH: &str = "CODECONV_LOG_PATH";
    pub const PROJECT_PATH: &str = "CODECONV_PROJECT_PATH";
    pub const OUTPUT_PATH: &str = "CODECONV_OUTPUT_PATH";
    pub const VO_PATH: &str = "CODECONV_VO_PATH";
}

/// Default interpreter used to launch the backend entry point.
pub const fn default_python() -> &'static str {
    if cfg!(windows) { "python" } else { "python3" }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the conversion backend.
    pub api_endpoint: String,
    /// Request timeout for `/convert-code` and `/make-vo`; `0` disables it.
    pub timeout_ms: u64,
    pub target_language: String,
    /// Interpreter used to run the backend entry point.
    pub python: String,
    /// Root the backend entry point and default log path are resolved against.
    pub workspace_root: PathBuf,
    pub server_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub project_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub vo_path: Option<PathBuf>,
}

impl Settings {
    /// Create settings with defaults rooted at `workspace_root`.
    pub fn with_defaults(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            python: default_python().to_string(),
            workspace_root: workspace_root.into(),
            server_path: None,
            log_path: None,
            project_path: None,
            output_path: None,
            vo_path: None,
        }
    }

    /// Resolve settings from a key lookup, falling back to defaults.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(default_workspace: &Path, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        // Always absolute
        let workspace_root = get(keys::WORKSPACE)
            .map_or_else(|| default_workspace.to_path_buf(), PathBuf::from);
        let mut settings = Self::with_defaults(absolutize(&workspace_root));

        if let Some(endpoint) = get(keys::API_ENDPOINT) {
            settings.api_endpoint = endpoint;
        }
        if let Some(raw) = get(keys::TIMEOUT_MS) {
            settings.timeout_ms = raw
                .parse()
                .map_err(|_| SettingsError::InvalidTimeout(raw.clone()))?;
        }
        if let Some(target) = get(keys::TARGET_LANGUAGE) {
            settings.target_language = target;
        }
        if let Some(python) = get(keys::PYTHON) {
            settings.python = python;
        }
        settings.server_path = get(keys::SERVER_PATH).map(PathBuf::from);
        settings.log_path = get(keys::LOG_PATH).map(PathBuf::from);
        settings.project_path = get(keys::PROJECT_PATH).map(PathBuf::from);
        settings.output_path = get(keys::OUTPUT_PATH).map(PathBuf::from);
        settings.vo_path = get(keys::VO_PATH).map(PathBuf::from);

        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Resolve settings from the process environment.
    pub fn from_env(default_workspace: &Path) -> Result<Self, SettingsError> {
        Self::from_lookup(default_workspace, |key| std::env::var(key).ok())
    }

    /// Request timeout for the conversion endpoints, `None` when unbounded.
    pub const fn request_timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }

    /// The log file to tail: the configured path or `<workspace>/logs/server.log`.
    pub fn effective_log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| self.workspace_root.join(DEFAULT_LOG_RELATIVE))
    }

    /// All settings as `(key, value)` pairs; unset optionals render as `""`.
    pub fn env_pairs(&self) -> Vec<(&'static str, String)> {
        let opt = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        vec![
            (keys::API_ENDPOINT, self.api_endpoint.clone()),
            (keys::TIMEOUT_MS, self.timeout_ms.to_string()),
            (keys::TARGET_LANGUAGE, self.target_language.clone()),
            (keys::PYTHON, self.python.clone()),
            (keys::WORKSPACE, self.workspace_root.display().to_string()),
            (keys::SERVER_PATH, opt(&self.server_path)),
            (keys::LOG_PATH, opt(&self.log_path)),
            (keys::PROJECT_PATH, opt(&self.project_path)),
            (keys::OUTPUT_PATH, opt(&self.output_path)),
            (keys::VO_PATH, opt(&self.vo_path)),
        ]
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("API endpoint must be an http(s) URL, got '{0}'")]
    InvalidEndpoint(String),

    #[error("Timeout must be a whole number of milliseconds, got '{0}'")]
    InvalidTimeout(String),

    #[error("Target language cannot be empty")]
    EmptyTargetLanguage,

    #[error("Python interpreter cannot be empty")]
    EmptyInterpreter,
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    let endpoint = settings.api_endpoint.trim();
    let has_scheme = endpoint.starts_with("http://") || endpoint.starts_with("https://");
    let has_host = endpoint
        .split_once("://")
        .is_some_and(|(_, rest)| !rest.trim_matches('/').is_empty());
    if !has_scheme || !has_host {
        return Err(SettingsError::InvalidEndpoint(settings.api_endpoint.clone()));
    }

    if settings.target_language.trim().is_empty() {
        return Err(SettingsError::EmptyTargetLanguage);
    }

    if settings.python.trim().is_empty() {
        return Err(SettingsError::EmptyInterpreter);
    }

    Ok(())
}
