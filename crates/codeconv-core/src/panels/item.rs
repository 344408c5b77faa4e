//! Tree items and the commands they trigger.

use serde::Serialize;

/// A user command reachable from a panel item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelCommand {
    ConvertSelection,
    GenerateVo,
    SetProjectPath,
    SetOutputPath,
    SetVoPath,
    SetServerPath,
    SetLogPath,
    StartServer,
    StopServer,
    RestartServer,
    StartLogMonitoring,
    StopLogMonitoring,
    ShowLogs,
    ClearLogs,
    RefreshVoPanel,
    RefreshConverterPanel,
}

impl PanelCommand {
    /// The session command line that performs this action.
    pub const fn session_hint(self) -> &'static str {
        match self {
            Self::ConvertSelection => "convert <file> <start> <end>",
            Self::GenerateVo => "make-vo",
            Self::SetProjectPath => "set project <path>",
            Self::SetOutputPath => "set output <path>",
            Self::SetVoPath => "set vo <path>",
            Self::SetServerPath => "set server <path>",
            Self::SetLogPath => "set log <path>",
            Self::StartServer => "server start",
            Self::StopServer => "server stop",
            Self::RestartServer => "server restart",
            Self::StartLogMonitoring => "logs watch",
            Self::StopLogMonitoring => "logs unwatch",
            Self::ShowLogs => "logs show",
            Self::ClearLogs => "logs clear",
            Self::RefreshVoPanel => "refresh vo",
            Self::RefreshConverterPanel => "refresh converter",
        }
    }
}

/// One node of a panel tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelItem {
    pub label: String,
    pub description: String,
    /// Icon name, e.g. `folder`, `check`, `error`.
    pub icon: &'static str,
    pub command: Option<PanelCommand>,
    pub collapsible: bool,
    pub children: Vec<PanelItem>,
}

impl PanelItem {
    /// A leaf item.
    pub fn leaf(label: impl Into<String>, icon: &'static str, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            icon,
            command: None,
            collapsible: false,
            children: Vec::new(),
        }
    }

    /// A collapsible group holding `children`.
    pub fn group(
        label: impl Into<String>,
        icon: &'static str,
        description: impl Into<String>,
        children: Vec<Self>,
    ) -> Self {
        Self {
            collapsible: true,
            children,
            ..Self::leaf(label, icon, description)
        }
    }

    #[must_use]
    pub fn with_command(mut self, command: PanelCommand) -> Self {
        self.command = Some(command);
        self
    }

    pub fn tooltip(&self) -> String {
        format!("{}: {}", self.label, self.description)
    }

    /// Find a direct child or nested descendant by label.
    pub fn find(&self, label: &str) -> Option<&Self> {
        if self.label == label {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(label))
    }
}
