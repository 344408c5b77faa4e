//! Lifecycle of the single backend process.
//!
//! At most one child is held at a time. A watcher task owns the `Child`:
//! it either observes a natural exit or, when asked by [`ServerManager::stop_server`],
//! performs the graceful shutdown and reports the exit status back. A
//! generation counter keeps a late watcher from clearing a newer process.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Local};
use codeconv_core::Settings;
use codeconv_core::ports::{LogSinkPort, LogSource};
use tokio::process::{Child, Command};
use tokio::sync::{Mutex, broadcast, oneshot};
use tracing::{debug, info, warn};

use super::entry::resolve_entry_point;
use super::error::ServerError;
use super::events::ServerEvent;
use super::shutdown::shutdown_child;
use super::stream::spawn_stream_reader;
use crate::logs::get_log_manager;

/// Pause between stop and start in [`ServerManager::restart_server`].
pub const RESTART_DELAY: Duration = Duration::from_secs(1);

const EVENT_CAPACITY: usize = 64;

/// Global server manager instance
static SERVER_MANAGER: LazyLock<Arc<ServerManager>> = LazyLock::new(|| {
    Arc::new(ServerManager::new(
        ServerConfig::default(),
        get_log_manager(),
    ))
});

/// Get the global server manager
pub fn get_server_manager() -> Arc<ServerManager> {
    SERVER_MANAGER.clone()
}

/// How the backend is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interpreter the entry point is run with.
    pub python: String,
    /// Root the entry point is resolved against.
    pub workspace_root: PathBuf,
    pub restart_delay: Duration,
}

impl ServerConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            python: settings.python.clone(),
            workspace_root: settings.workspace_root.clone(),
            restart_delay: RESTART_DELAY,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            python: codeconv_core::settings::default_python().to_string(),
            workspace_root: PathBuf::from("."),
            restart_delay: RESTART_DELAY,
        }
    }
}

/// Result of [`ServerManager::start_server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started { pid: u32, entry_point: PathBuf },
    /// A process was already held; nothing was spawned.
    AlreadyRunning { pid: u32 },
}

impl StartOutcome {
    pub const fn pid(&self) -> u32 {
        match self {
            Self::Started { pid, .. } | Self::AlreadyRunning { pid } => *pid,
        }
    }
}

/// Snapshot of the backend process state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerStatus {
    Stopped,
    Running {
        pid: u32,
        entry_point: PathBuf,
        started_at: DateTime<Local>,
    },
}

impl ServerStatus {
    pub const fn pid(&self) -> Option<u32> {
        match self {
            Self::Stopped => None,
            Self::Running { pid, .. } => Some(*pid),
        }
    }

    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

type StopReply = oneshot::Sender<std::io::Result<ExitStatus>>;

struct RunningServer {
    pid: u32,
    entry_point: PathBuf,
    started_at: DateTime<Local>,
    generation: u64,
    stop_tx: oneshot::Sender<StopReply>,
}

#[derive(Default)]
struct State {
    running: Option<RunningServer>,
    generation: u64,
}

/// Starts, stops and watches the backend process.
pub struct ServerManager {
    state: Arc<Mutex<State>>,
    config: RwLock<ServerConfig>,
    sink: Arc<dyn LogSinkPort>,
    events: broadcast::Sender<ServerEvent>,
}

impl ServerManager {
    pub fn new(config: ServerConfig, sink: Arc<dyn LogSinkPort>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(State::default())),
            config: RwLock::new(config),
            sink,
            events,
        }
    }

    /// Replace the launch configuration; applies to the next start.
    pub fn configure(&self, config: ServerConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    pub fn config(&self) -> ServerConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Subscribe to lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: ServerEvent) {
        // No receivers is fine
        let _ = self.events.send(event);
    }

    fn notice(&self, line: String) {
        self.sink.append(LogSource::System, line);
    }

    /// Start the backend unless one is already held.
    ///
    /// `entry` overrides the discovered entry point.
    pub async fn start_server(&self, entry: Option<&Path>) -> Result<StartOutcome, ServerError> {
        // Held across the spawn so two concurrent starts cannot both spawn
        let mut state = self.state.lock().await;
        if let Some(running) = &state.running {
            self.notice(format!("Server is already running (pid {})", running.pid));
            return Ok(StartOutcome::AlreadyRunning { pid: running.pid });
        }

        let config = self.config();
        let entry_point = resolve_entry_point(&config.workspace_root, entry)?;
        let mut child = match spawn_backend(&config.python, &entry_point) {
            Ok(child) => child,
            Err(e) => {
                warn!(program = %config.python, error = %e, "Failed to spawn backend");
                self.notice(format!("Failed to start server: {e}"));
                self.emit(ServerEvent::SpawnFailed {
                    reason: e.to_string(),
                });
                return Err(ServerError::SpawnFailed {
                    program: config.python,
                    reason: e.to_string(),
                });
            }
        };

        let Some(pid) = child.id() else {
            let status = child.wait().await.ok();
            let reason = format!("process exited immediately ({status:?})");
            self.emit(ServerEvent::SpawnFailed {
                reason: reason.clone(),
            });
            return Err(ServerError::SpawnFailed {
                program: config.python,
                reason,
            });
        };

        if let Some(stdout) = child.stdout.take() {
            spawn_stream_reader(stdout, pid, LogSource::Stdout, self.sink.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_stream_reader(stderr, pid, LogSource::Stderr, self.sink.clone());
        }

        state.generation += 1;
        let generation = state.generation;
        let (stop_tx, stop_rx) = oneshot::channel();
        state.running = Some(RunningServer {
            pid,
            entry_point: entry_point.clone(),
            started_at: Local::now(),
            generation,
            stop_tx,
        });
        drop(state);

        info!(pid, entry = %entry_point.display(), "Backend started");
        self.notice(format!(
            "Server started (pid {pid}): {} {}",
            config.python,
            entry_point.display()
        ));
        self.emit(ServerEvent::Started {
            pid,
            entry_point: entry_point.clone(),
        });

        // Spawned last so `Exited` can never precede `Started`
        self.spawn_watcher(child, pid, generation, stop_rx);
        Ok(StartOutcome::Started { pid, entry_point })
    }

    fn spawn_watcher(
        &self,
        mut child: Child,
        pid: u32,
        generation: u64,
        stop_rx: oneshot::Receiver<StopReply>,
    ) {
        let state = self.state.clone();
        let sink = self.sink.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            tokio::select! {
                status = child.wait() => {
                    {
                        let mut state = state.lock().await;
                        if state.running.as_ref().is_some_and(|r| r.generation == generation) {
                            state.running = None;
                        }
                    }
                    let code = status.as_ref().ok().and_then(ExitStatus::code);
                    match &status {
                        Ok(status) => sink.append(
                            LogSource::System,
                            format!("Server process exited ({status})"),
                        ),
                        Err(e) => sink.append(
                            LogSource::System,
                            format!("Server process wait failed: {e}"),
                        ),
                    }
                    debug!(pid, ?code, "Backend exited");
                    let _ = events.send(ServerEvent::Exited { pid, code });
                }
                reply = stop_rx => {
                    let result = shutdown_child(child).await;
                    if let Ok(reply) = reply {
                        let _ = reply.send(result);
                    }
                }
            }
        });
    }

    /// Stop the held process. Returns whether one was running.
    pub async fn stop_server(&self) -> bool {
        let running = self.state.lock().await.running.take();
        let Some(running) = running else {
            debug!("Stop requested with no backend running");
            self.notice("No server process is running".to_string());
            return false;
        };

        let pid = running.pid;
        let (reply_tx, reply_rx) = oneshot::channel();
        if running.stop_tx.send(reply_tx).is_ok() {
            match reply_rx.await {
                Ok(Ok(status)) => debug!(pid, %status, "Backend shut down"),
                Ok(Err(e)) => warn!(pid, error = %e, "Backend shutdown failed"),
                // Watcher saw the exit first
                Err(_) => debug!(pid, "Backend had already exited"),
            }
        }

        info!(pid, "Backend stopped");
        self.notice(format!("Server stopped (pid {pid})"));
        self.emit(ServerEvent::Stopped { pid });
        true
    }

    /// Stop, wait the restart delay, start again.
    pub async fn restart_server(&self, entry: Option<&Path>) -> Result<StartOutcome, ServerError> {
        self.stop_server().await;
        tokio::time::sleep(self.config().restart_delay).await;
        self.start_server(entry).await
    }

    pub async fn status(&self) -> ServerStatus {
        self.state
            .lock()
            .await
            .running
            .as_ref()
            .map_or(ServerStatus::Stopped, |r| ServerStatus::Running {
                pid: r.pid,
                entry_point: r.entry_point.clone(),
                started_at: r.started_at,
            })
    }

    pub async fn is_running(&self) -> bool {
        self.state.lock().await.running.is_some()
    }
}

fn spawn_backend(python: &str, entry_point: &Path) -> std::io::Result<Child> {
    let mut cmd = Command::new(python);
    cmd.arg(entry_point)
        .env("PYTHONUNBUFFERED", "1")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = entry_point.parent().filter(|d| !d.as_os_str().is_empty()) {
        cmd.current_dir(dir);
    }
    cmd.spawn()
}
