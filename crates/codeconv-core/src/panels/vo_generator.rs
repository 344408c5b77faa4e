//! The VO generator panel.

use std::path::{Path, PathBuf};

use super::item::{PanelCommand, PanelItem};
use super::refresh::{PanelKind, RefreshSignal};
use crate::project::count_source_files;

const NO_RESULT: &str = "No analysis performed yet";

/// Outcome of the last VO generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Success,
    Error,
}

impl RunStatus {
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Idle => "circle-outline",
            Self::Running => "loading",
            Self::Success => "check",
            Self::Error => "error",
        }
    }

    pub const fn text(self) -> &'static str {
        match self {
            Self::Idle => "Ready to generate VO",
            Self::Running => "Running VO generation...",
            Self::Success => "VO generation completed",
            Self::Error => "VO generation failed",
        }
    }
}

/// State behind the VO generator panel.
#[derive(Debug)]
pub struct VoGeneratorPanel {
    project_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    file_count: u64,
    status: RunStatus,
    last_result: String,
    refresh: RefreshSignal,
}

impl VoGeneratorPanel {
    pub fn new(refresh: RefreshSignal) -> Self {
        Self {
            project_path: None,
            output_path: None,
            file_count: 0,
            status: RunStatus::Idle,
            last_result: NO_RESULT.to_string(),
            refresh,
        }
    }

    pub fn project_path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub const fn file_count(&self) -> u64 {
        self.file_count
    }

    pub const fn status(&self) -> RunStatus {
        self.status
    }

    pub fn last_result(&self) -> &str {
        &self.last_result
    }

    /// Suggested output directory: `<project>/generated`.
    pub fn default_output_path(&self) -> Option<PathBuf> {
        self.project_path.as_ref().map(|p| p.join("generated"))
    }

    /// Set the project path and recount its source files.
    pub fn set_project_path(&mut self, path: PathBuf) {
        self.file_count = count_source_files(&path);
        self.project_path = Some(path);
        self.refresh();
    }

    pub fn set_output_path(&mut self, path: PathBuf) {
        self.output_path = Some(path);
        self.refresh();
    }

    pub fn mark_running(&mut self) {
        self.status = RunStatus::Running;
        self.refresh();
    }

    pub fn record_success(&mut self, file_count: u64, result: String) {
        self.file_count = file_count;
        self.last_result = result;
        self.status = RunStatus::Success;
        self.refresh();
    }

    pub fn record_error(&mut self, message: &str) {
        self.last_result = format!("Error: {message}");
        self.status = RunStatus::Error;
        self.refresh();
    }

    pub fn refresh(&self) {
        self.refresh.fire(PanelKind::VoGenerator);
    }

    /// Top-level items of the panel.
    pub fn items(&self) -> Vec<PanelItem> {
        let path_or = |p: &Option<PathBuf>, placeholder: &str| {
            p.as_ref()
                .map_or_else(|| placeholder.to_string(), |p| p.display().to_string())
        };

        vec![
            PanelItem::leaf(
                "Project Path",
                "folder",
                path_or(&self.project_path, "Click to set project path"),
            )
            .with_command(PanelCommand::SetProjectPath),
            PanelItem::leaf(
                "Output Path",
                "folder-opened",
                path_or(&self.output_path, "Click to set output path"),
            )
            .with_command(PanelCommand::SetOutputPath),
            PanelItem::leaf("File Count", "file", format!("{} files", self.file_count)),
            PanelItem::leaf("Status", self.status.icon(), self.status.text())
                .with_command(PanelCommand::GenerateVo),
            PanelItem::group(
                "Last Result",
                "output",
                self.last_result.lines().next().unwrap_or_default(),
                vec![PanelItem::leaf(self.last_result.clone(), "info", "")],
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_initial_items_show_placeholders() {
        let panel = VoGeneratorPanel::new(RefreshSignal::new());
        let items = panel.items();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].description, "Click to set project path");
        assert_eq!(items[0].command, Some(PanelCommand::SetProjectPath));
        assert_eq!(items[2].description, "0 files");
        assert_eq!(items[3].description, "Ready to generate VO");
        assert_eq!(items[4].children[0].label, NO_RESULT);
    }

    #[test]
    fn test_set_project_path_counts_and_refreshes() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("A.java"), "class A {}").unwrap();
        fs::write(temp.path().join("b.py"), "pass").unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();

        let signal = RefreshSignal::new();
        let mut rx = signal.subscribe();
        let mut panel = VoGeneratorPanel::new(signal);
        panel.set_project_path(temp.path().to_path_buf());

        assert_eq!(panel.file_count(), 2);
        assert_eq!(rx.try_recv().unwrap(), PanelKind::VoGenerator);
        assert_eq!(
            panel.default_output_path(),
            Some(temp.path().join("generated"))
        );
    }

    #[test]
    fn test_record_error_prefixes_message() {
        let mut panel = VoGeneratorPanel::new(RefreshSignal::new());
        panel.mark_running();
        assert_eq!(panel.status(), RunStatus::Running);
        panel.record_error("LLM API is not available");
        assert_eq!(panel.status(), RunStatus::Error);
        assert_eq!(panel.last_result(), "Error: LLM API is not available");
    }
}
