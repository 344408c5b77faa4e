//! The code converter panel.

use std::path::PathBuf;

use chrono::Local;

use super::item::{PanelCommand, PanelItem};
use super::refresh::{PanelKind, RefreshSignal};

/// Number of history entries shown, newest first.
pub const HISTORY_VISIBLE: usize = 5;

const NO_CONVERSION: &str = "No conversion performed yet";

/// Reachability of the backend as of the last health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

impl ApiStatus {
    pub const fn from_health(healthy: bool) -> Self {
        if healthy { Self::Online } else { Self::Offline }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Unknown => "question",
            Self::Online => "check",
            Self::Offline => "error",
        }
    }

    pub const fn text(self) -> &'static str {
        match self {
            Self::Unknown => "Checking API...",
            Self::Online => "API Server Online",
            Self::Offline => "API Server Offline",
        }
    }
}

/// What the panel shows about the backend process and its log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerSnapshot {
    pub server_path: Option<PathBuf>,
    pub pid: Option<u32>,
    pub log_path: Option<PathBuf>,
    pub monitoring: bool,
}

/// State behind the code converter panel.
#[derive(Debug)]
pub struct CodeConverterPanel {
    api_status: ApiStatus,
    last_conversion: String,
    history: Vec<String>,
    endpoint: String,
    timeout_ms: u64,
    vo_path: Option<PathBuf>,
    server: ServerSnapshot,
    refresh: RefreshSignal,
}

impl CodeConverterPanel {
    pub fn new(refresh: RefreshSignal, endpoint: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            api_status: ApiStatus::Unknown,
            last_conversion: NO_CONVERSION.to_string(),
            history: Vec::new(),
            endpoint: endpoint.into(),
            timeout_ms,
            vo_path: None,
            server: ServerSnapshot::default(),
            refresh,
        }
    }

    pub const fn api_status(&self) -> ApiStatus {
        self.api_status
    }

    pub fn last_conversion(&self) -> &str {
        &self.last_conversion
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn vo_path(&self) -> Option<&std::path::Path> {
        self.vo_path.as_deref()
    }

    pub const fn server(&self) -> &ServerSnapshot {
        &self.server
    }

    pub fn set_api_status(&mut self, status: ApiStatus) {
        self.api_status = status;
        self.refresh();
    }

    /// Record a finished conversion, stamped with the local time.
    pub fn add_history(&mut self, description: &str) {
        let timestamp = Local::now().format("%H:%M:%S");
        self.history.push(format!("{timestamp}: {description}"));
        self.last_conversion = description.to_string();
        self.refresh();
    }

    pub fn set_vo_path(&mut self, path: PathBuf) {
        self.vo_path = Some(path);
        self.refresh();
    }

    pub fn set_server_snapshot(&mut self, snapshot: ServerSnapshot) {
        self.server = snapshot;
        self.refresh();
    }

    pub fn refresh(&self) {
        self.refresh.fire(PanelKind::CodeConverter);
    }

    fn history_items(&self) -> Vec<PanelItem> {
        self.history
            .iter()
            .rev()
            .take(HISTORY_VISIBLE)
            .enumerate()
            .map(|(i, entry)| PanelItem::leaf(format!("{}. {entry}", i + 1), "file", ""))
            .collect()
    }

    fn server_items(&self) -> Vec<PanelItem> {
        let server = &self.server;
        let (status_icon, status_text) = server
            .pid
            .map_or(("circle-outline", "Stopped".to_string()), |pid| {
                ("check", format!("Running (pid {pid})"))
            });

        vec![
            PanelItem::leaf(
                "Server Path",
                "file-code",
                server.server_path.as_ref().map_or_else(
                    || "Auto-detect under workspace".to_string(),
                    |p| p.display().to_string(),
                ),
            )
            .with_command(PanelCommand::SetServerPath),
            PanelItem::leaf("Server Status", status_icon, status_text).with_command(
                if server.pid.is_some() {
                    PanelCommand::StopServer
                } else {
                    PanelCommand::StartServer
                },
            ),
            PanelItem::leaf(
                "Log Path",
                "output",
                server
                    .log_path
                    .as_ref()
                    .map_or_else(|| "Not set".to_string(), |p| p.display().to_string()),
            )
            .with_command(PanelCommand::SetLogPath),
            PanelItem::leaf(
                "Log Monitoring",
                if server.monitoring { "eye" } else { "eye-closed" },
                if server.monitoring { "Watching" } else { "Idle" },
            )
            .with_command(if server.monitoring {
                PanelCommand::StopLogMonitoring
            } else {
                PanelCommand::StartLogMonitoring
            }),
        ]
    }

    fn settings_items(&self) -> Vec<PanelItem> {
        let timeout = if self.timeout_ms == 0 {
            "unbounded".to_string()
        } else {
            format!("{}ms", self.timeout_ms)
        };
        vec![
            PanelItem::leaf("API Endpoint", "link", self.endpoint.clone()),
            PanelItem::leaf("Timeout", "clock", timeout),
            PanelItem::leaf(
                "VO Path",
                "folder",
                self.vo_path
                    .as_ref()
                    .map_or_else(|| "Not set".to_string(), |p| p.display().to_string()),
            )
            .with_command(PanelCommand::SetVoPath),
        ]
    }

    /// Top-level items of the panel.
    pub fn items(&self) -> Vec<PanelItem> {
        vec![
            PanelItem::leaf("API Status", self.api_status.icon(), self.api_status.text())
                .with_command(PanelCommand::RefreshConverterPanel),
            PanelItem::leaf(
                "Convert Selection",
                "arrow-right",
                "Select lines and convert Map to VO",
            )
            .with_command(PanelCommand::ConvertSelection),
            PanelItem::leaf("Last Conversion", "file-text", self.last_conversion.clone()),
            PanelItem::group(
                "History",
                "history",
                format!("{} conversions", self.history.len()),
                self.history_items(),
            ),
            PanelItem::group("Server", "server", "Backend process", self.server_items()),
            PanelItem::group("Settings", "gear", "API configuration", self.settings_items()),
        ]
    }
}
