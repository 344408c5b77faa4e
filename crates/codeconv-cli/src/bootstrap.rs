//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Settings (environment + `.env` file + command-line overrides)
//! - API client (via codeconv-client)
//! - Backend process manager, log buffer and log tailer (via codeconv-runtime)
//! - Panel models sharing one refresh signal (via codeconv-core)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use codeconv_client::{ApiClient, ApiClientConfig};
use codeconv_core::ports::ConverterApiPort;
use codeconv_core::{
    CodeConverterPanel, RefreshSignal, ServerSnapshot, Settings, VoGeneratorPanel, absolutize,
    validate_settings,
};
use codeconv_runtime::{
    LogManager, LogTailer, ServerConfig, ServerManager, get_log_manager, get_log_tailer,
    get_server_manager,
};
use tracing::debug;

use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub settings: Settings,
}

impl CliConfig {
    /// Resolve settings from the environment, then apply command-line overrides.
    pub fn from_env(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let settings = Settings::from_env(&cwd)?;
        Self::with_overrides(settings, cli)
    }

    /// Apply the global command-line options on top of `settings`.
    pub fn with_overrides(mut settings: Settings, cli: &Cli) -> Result<Self> {
        if let Some(endpoint) = &cli.endpoint {
            settings.api_endpoint.clone_from(endpoint);
        }
        if let Some(timeout_ms) = cli.timeout_ms {
            settings.timeout_ms = timeout_ms;
        }
        if let Some(workspace) = &cli.workspace {
            settings.workspace_root = absolutize(workspace);
        }
        validate_settings(&settings)?;
        Ok(Self { settings })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    pub settings: Settings,
    /// The backend API, behind its port.
    pub api: Arc<dyn ConverterApiPort>,
    pub servers: Arc<ServerManager>,
    pub tailer: Arc<LogTailer>,
    pub logs: Arc<LogManager>,
    pub refresh: RefreshSignal,
}

impl CliContext {
    /// A VO generator panel seeded with the configured paths.
    ///
    /// Without a configured output path the project's `generated` directory
    /// is suggested, as the panel does when a project is picked.
    pub fn vo_panel(&self) -> VoGeneratorPanel {
        let mut panel = VoGeneratorPanel::new(self.refresh.clone());
        if let Some(project) = &self.settings.project_path {
            panel.set_project_path(project.clone());
        }
        if let Some(output) = self
            .settings
            .output_path
            .clone()
            .or_else(|| panel.default_output_path())
        {
            panel.set_output_path(output);
        }
        panel
    }

    /// A code converter panel seeded with the configured endpoint and paths.
    pub fn converter_panel(&self) -> CodeConverterPanel {
        let mut panel = CodeConverterPanel::new(
            self.refresh.clone(),
            self.api.endpoint(),
            self.settings.timeout_ms,
        );
        if let Some(vo_path) = &self.settings.vo_path {
            panel.set_vo_path(vo_path.clone());
        }
        panel
    }

    /// What the converter panel should show about the backend right now.
    pub async fn server_snapshot(&self) -> ServerSnapshot {
        let watched = self.tailer.path().await;
        ServerSnapshot {
            server_path: self.settings.server_path.clone(),
            pid: self.servers.status().await.pid(),
            monitoring: watched.is_some(),
            log_path: Some(
                watched.unwrap_or_else(|| self.settings.effective_log_path()),
            ),
        }
    }

    /// Push changed launch/log settings into the runtime singletons.
    pub fn apply_runtime_settings(&self) {
        self.servers
            .configure(ServerConfig::from_settings(&self.settings));
        self.tailer
            .set_default_path(self.settings.effective_log_path());
    }

    /// Replace the settings and rebuild what depends on them.
    pub fn update_settings(&mut self, settings: Settings) -> Result<()> {
        validate_settings(&settings)?;
        if settings.api_endpoint != self.settings.api_endpoint
            || settings.timeout_ms != self.settings.timeout_ms
        {
            self.api = build_api(&settings)?;
        }
        self.settings = settings;
        self.apply_runtime_settings();
        Ok(())
    }

    pub fn entry_override(&self) -> Option<PathBuf> {
        self.settings.server_path.clone()
    }
}

fn build_api(settings: &Settings) -> Result<Arc<dyn ConverterApiPort>> {
    let config = ApiClientConfig::from_settings(settings)?;
    Ok(Arc::new(ApiClient::new(config)?))
}

/// Bootstrap the CLI application.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let settings = config.settings;
    debug!(endpoint = %settings.api_endpoint, workspace = %settings.workspace_root.display(), "Bootstrapping");

    let ctx = CliContext {
        api: build_api(&settings)?,
        servers: get_server_manager(),
        tailer: get_log_tailer(),
        logs: get_log_manager(),
        refresh: RefreshSignal::new(),
        settings,
    };
    ctx.apply_runtime_settings();
    Ok(ctx)
}
