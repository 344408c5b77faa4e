//! Interactive session.
//!
//! Keeps the panels, the backend child process and the log tail alive
//! between commands. After every command the panels that signalled a
//! change are re-rendered.

pub mod command;
pub mod reader;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use codeconv_core::{
    CodeConverterPanel, ConversionService, PanelKind, Selection, VoGenerationService,
    VoGeneratorPanel, data_root, normalize_user_path, refresh_api_status,
};
use codeconv_runtime::{LogManager, LogTailer, ServerStatus, StartOutcome};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::handlers::panels::{CONVERTER_TITLE, VO_TITLE};
use crate::presentation::{format_log_entry, render_panel};

pub use command::{LogsAction, ParseError, ServerAction, SessionCommand, SetTarget, parse};
pub use reader::{LineReader, ReadOutcome};

/// Delay between starting the backend and attaching the log tail.
pub const LOG_ATTACH_DELAY: Duration = Duration::from_secs(2);

const PROMPT: &str = "codeconv> ";
const HISTORY_FILE: &str = "session_history";

/// State of one interactive session.
pub struct Session {
    ctx: CliContext,
    vo: VoGeneratorPanel,
    converter: CodeConverterPanel,
    refresh_rx: broadcast::Receiver<PanelKind>,
    follow: Arc<AtomicBool>,
    forwarder: JoinHandle<()>,
    attach: Option<JoinHandle<()>>,
}

impl Session {
    /// Build the session panels from `ctx` and start the live log forwarder.
    pub fn new(ctx: CliContext) -> Self {
        let refresh_rx = ctx.refresh.subscribe();
        let vo = ctx.vo_panel();
        let converter = ctx.converter_panel();
        let follow = Arc::new(AtomicBool::new(true));
        let forwarder = spawn_forwarder(&ctx.logs, follow.clone());
        Self {
            ctx,
            vo,
            converter,
            refresh_rx,
            follow,
            forwarder,
            attach: None,
        }
    }

    pub const fn vo_panel(&self) -> &VoGeneratorPanel {
        &self.vo
    }

    pub const fn converter_panel(&self) -> &CodeConverterPanel {
        &self.converter
    }

    pub const fn context(&self) -> &CliContext {
        &self.ctx
    }

    /// Whether captured log lines are printed as they arrive.
    pub fn is_following(&self) -> bool {
        self.follow.load(Ordering::Relaxed)
    }

    /// Run one parsed command.
    pub async fn dispatch(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::Convert { file, start, end } => self.convert(&file, start, end).await,
            SessionCommand::MakeVo => self.make_vo().await,
            SessionCommand::Set { target, path } => self.set_path(target, &path).await,
            SessionCommand::Server(action) => self.server(action).await,
            SessionCommand::Logs(action) => self.logs(action).await,
            SessionCommand::Refresh(PanelKind::VoGenerator) => {
                if let Some(project) = self.vo.project_path().map(Path::to_path_buf) {
                    // Recount source files
                    self.vo.set_project_path(project);
                } else {
                    self.vo.refresh();
                }
                Ok(())
            }
            SessionCommand::Refresh(PanelKind::CodeConverter) => {
                refresh_api_status(self.ctx.api.as_ref(), &mut self.converter).await;
                Ok(())
            }
            SessionCommand::Panels => {
                refresh_api_status(self.ctx.api.as_ref(), &mut self.converter).await;
                self.sync_server_snapshot().await;
                self.drain_refresh();
                self.render(PanelKind::VoGenerator);
                self.render(PanelKind::CodeConverter);
                Ok(())
            }
            SessionCommand::Help => {
                println!("{}", command::HELP);
                Ok(())
            }
            SessionCommand::Quit | SessionCommand::Empty => Ok(()),
        }
    }

    async fn convert(&mut self, file: &Path, start: u32, end: u32) -> Result<()> {
        let file = normalize_user_path(&file.to_string_lossy())?;
        let selection = Selection::from_file(&file, start, end)?;
        let service = ConversionService::new(self.ctx.api.clone())
            .with_target_language(self.ctx.settings.target_language.clone())
            .with_vo_path(self.converter.vo_path().map(Path::to_path_buf));

        println!("Converting Map to VO...");
        let response = service
            .convert_selection(&mut self.converter, selection)
            .await?;

        println!("{}", response.converted_code.trim_end());
        println!(
            "✓ Conversion completed! Processing time: {:.2}s",
            response.processing_time
        );
        Ok(())
    }

    async fn make_vo(&mut self) -> Result<()> {
        println!("Generating VO...");
        let outcome = VoGenerationService::new(self.ctx.api.clone())
            .run(&mut self.vo)
            .await?;

        println!("{}", outcome.vo_code.trim_end());
        match outcome.saved_to {
            Ok(path) => println!("✓ VO file saved: {}", path.display()),
            Err(reason) => eprintln!("✗ Failed to save VO file: {reason}"),
        }
        Ok(())
    }

    async fn set_path(&mut self, target: SetTarget, raw: &Path) -> Result<()> {
        let path = normalize_user_path(&raw.to_string_lossy())?;
        let mut settings = self.ctx.settings.clone();
        match target {
            SetTarget::Project => {
                self.vo.set_project_path(path.clone());
                if self.vo.output_path().is_none()
                    && let Some(default) = self.vo.default_output_path()
                {
                    self.vo.set_output_path(default);
                }
                settings.project_path = Some(path.clone());
            }
            SetTarget::Output => {
                self.vo.set_output_path(path.clone());
                settings.output_path = Some(path.clone());
            }
            SetTarget::Vo => {
                self.converter.set_vo_path(path.clone());
                settings.vo_path = Some(path.clone());
            }
            SetTarget::Server => settings.server_path = Some(path.clone()),
            SetTarget::Log => settings.log_path = Some(path.clone()),
        }
        self.ctx.update_settings(settings)?;

        if target == SetTarget::Log && self.ctx.tailer.is_monitoring().await {
            self.ctx.tailer.start_monitoring(Some(path.clone())).await;
        }
        println!("✓ {} path set to {}", target_name(target), path.display());
        Ok(())
    }

    async fn server(&mut self, action: ServerAction) -> Result<()> {
        let servers = self.ctx.servers.clone();
        match action {
            ServerAction::Start(entry) => {
                let entry = entry.or_else(|| self.ctx.entry_override());
                let outcome = servers.start_server(entry.as_deref()).await?;
                self.report_start(&outcome);
            }
            ServerAction::Restart => {
                self.cancel_attach();
                let entry = self.ctx.entry_override();
                let outcome = servers.restart_server(entry.as_deref()).await?;
                self.report_start(&outcome);
            }
            ServerAction::Stop => {
                self.cancel_attach();
                if servers.stop_server().await {
                    println!("✓ Server stopped");
                } else {
                    println!("No server process is running");
                }
            }
            ServerAction::Status => match servers.status().await {
                ServerStatus::Stopped => println!("Server: stopped"),
                ServerStatus::Running {
                    pid,
                    entry_point,
                    started_at,
                } => println!(
                    "Server: running (pid {pid}) {} since {}",
                    entry_point.display(),
                    started_at.format("%H:%M:%S")
                ),
            },
        }
        Ok(())
    }

    fn report_start(&mut self, outcome: &StartOutcome) {
        match outcome {
            StartOutcome::Started { pid, entry_point } => {
                println!("✓ Server started (pid {pid}): {}", entry_point.display());
                self.schedule_log_attach();
            }
            StartOutcome::AlreadyRunning { pid } => {
                println!("Server is already running (pid {pid})");
            }
        }
    }

    /// Attach the log tail once the backend had time to open its log file.
    fn schedule_log_attach(&mut self) {
        self.cancel_attach();
        let tailer = self.ctx.tailer.clone();
        self.attach = Some(tokio::spawn(async move {
            tokio::time::sleep(LOG_ATTACH_DELAY).await;
            attach_tail(&tailer).await;
        }));
    }

    fn cancel_attach(&mut self) {
        if let Some(handle) = self.attach.take() {
            handle.abort();
        }
    }

    async fn logs(&mut self, action: LogsAction) -> Result<()> {
        let tailer = self.ctx.tailer.clone();
        match action {
            LogsAction::Watch(path) => {
                let path = path
                    .map(|p| normalize_user_path(&p.to_string_lossy()))
                    .transpose()?;
                match tailer.start_monitoring(path).await {
                    Some(path) => println!("✓ Watching {}", path.display()),
                    None => println!("No log path configured. Use 'set log <path>'"),
                }
            }
            LogsAction::Unwatch => {
                if tailer.stop_monitoring().await {
                    println!("✓ Log monitoring stopped");
                } else {
                    println!("Log monitoring is not active");
                }
            }
            LogsAction::Show(n) => {
                for entry in self.ctx.logs.tail(n) {
                    println!("{}", format_log_entry(&entry));
                }
            }
            LogsAction::Clear => {
                self.ctx.logs.clear();
                println!("✓ Captured logs cleared");
            }
            LogsAction::Follow => {
                self.follow.store(true, Ordering::Relaxed);
                println!("✓ Printing log lines as they arrive");
            }
            LogsAction::Mute => {
                self.follow.store(false, Ordering::Relaxed);
                println!("✓ Live log output muted. Use 'logs show' to read captured lines");
            }
        }
        Ok(())
    }

    /// Mirror the backend and tail state into the converter panel.
    async fn sync_server_snapshot(&mut self) {
        let snapshot = self.ctx.server_snapshot().await;
        if *self.converter.server() != snapshot {
            self.converter.set_server_snapshot(snapshot);
        }
    }

    /// Panels that signalled a change since the last call, each once.
    fn drain_refresh(&mut self) -> Vec<PanelKind> {
        let mut changed = Vec::new();
        let mut mark = |kind| {
            if !changed.contains(&kind) {
                changed.push(kind);
            }
        };
        loop {
            match self.refresh_rx.try_recv() {
                Ok(kind) => mark(kind),
                Err(TryRecvError::Lagged(_)) => {
                    mark(PanelKind::VoGenerator);
                    mark(PanelKind::CodeConverter);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        changed
    }

    /// Re-render every panel that changed since the last command.
    pub async fn render_refreshed(&mut self) -> Vec<PanelKind> {
        self.sync_server_snapshot().await;
        let changed = self.drain_refresh();
        for kind in &changed {
            self.render(*kind);
        }
        changed
    }

    fn render(&self, kind: PanelKind) {
        let text = match kind {
            PanelKind::VoGenerator => render_panel(VO_TITLE, &self.vo.items()),
            PanelKind::CodeConverter => render_panel(CONVERTER_TITLE, &self.converter.items()),
        };
        println!("\n{text}");
    }

    /// Stop background work, the log tail and the backend.
    pub async fn shutdown(mut self) {
        self.cancel_attach();
        self.forwarder.abort();
        self.ctx.tailer.stop_monitoring().await;
        if self.ctx.servers.stop_server().await {
            debug!("Backend stopped at session end");
        }
    }
}

const fn target_name(target: SetTarget) -> &'static str {
    match target {
        SetTarget::Project => "Project",
        SetTarget::Output => "Output",
        SetTarget::Vo => "VO",
        SetTarget::Server => "Server",
        SetTarget::Log => "Log",
    }
}

async fn attach_tail(tailer: &LogTailer) {
    if let Some(path) = tailer.start_monitoring(None).await {
        debug!(path = %path.display(), "Log tail attached");
    }
}

fn spawn_forwarder(logs: &LogManager, follow: Arc<AtomicBool>) -> JoinHandle<()> {
    let mut rx = logs.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(entry) => {
                    if follow.load(Ordering::Relaxed) {
                        println!("{}", format_log_entry(&entry));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    if follow.load(Ordering::Relaxed) {
                        println!("... {skipped} log lines skipped");
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn history_path() -> Option<PathBuf> {
    data_root().ok().map(|root| root.join(HISTORY_FILE))
}

/// Run the interactive session until `quit` or end of input.
pub async fn run(ctx: CliContext) -> Result<()> {
    let mut reader = LineReader::spawn(history_path()).context("Failed to start session")?;
    let mut session = Session::new(ctx);

    println!("codeconv interactive session. Type 'help' for commands, 'quit' to leave.");
    session.dispatch(SessionCommand::Panels).await?;

    loop {
        let line = match reader.read_line(PROMPT).await {
            ReadOutcome::Line(line) => line,
            ReadOutcome::Interrupted => {
                println!("(Use 'quit' to leave the session)");
                continue;
            }
            ReadOutcome::Eof => break,
        };

        match parse(&line) {
            Ok(SessionCommand::Quit) => break,
            Ok(command) => {
                if let Err(e) = session.dispatch(command).await {
                    eprintln!("✗ {e:#}");
                }
            }
            Err(e) => eprintln!("{e}"),
        }
        session.render_refreshed().await;
    }

    reader.close();
    session.shutdown().await;
    Ok(())
}
