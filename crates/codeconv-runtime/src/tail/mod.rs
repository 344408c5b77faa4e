//! Log file tailing.
//!
//! [`LogTailer`] follows one file at a time: it dumps the current content,
//! then polls size and mtime and forwards only newly appended lines to the
//! log sink. File errors are logged and swallowed; polling carries on and
//! picks the file up from the start once it (re)appears.

mod cursor;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use std::time::Duration;

use codeconv_core::ports::{LogSinkPort, LogSource};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub use cursor::{TailCursor, split_lines};

use crate::logs::get_log_manager;

/// Interval between two size/mtime checks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Global log tailer instance
static LOG_TAILER: LazyLock<Arc<LogTailer>> =
    LazyLock::new(|| Arc::new(LogTailer::new(get_log_manager())));

/// Get the global log tailer
pub fn get_log_tailer() -> Arc<LogTailer> {
    LOG_TAILER.clone()
}

struct Watch {
    path: PathBuf,
    task: JoinHandle<()>,
}

/// Follows a single log file and forwards new lines to a sink.
pub struct LogTailer {
    sink: Arc<dyn LogSinkPort>,
    poll_interval: Duration,
    default_path: RwLock<Option<PathBuf>>,
    watch: Mutex<Option<Watch>>,
}

impl LogTailer {
    pub fn new(sink: Arc<dyn LogSinkPort>) -> Self {
        Self::with_poll_interval(sink, POLL_INTERVAL)
    }

    pub fn with_poll_interval(sink: Arc<dyn LogSinkPort>, poll_interval: Duration) -> Self {
        Self {
            sink,
            poll_interval,
            default_path: RwLock::new(None),
            watch: Mutex::new(None),
        }
    }

    /// Path used by [`start_monitoring`](Self::start_monitoring) when none is given.
    pub fn set_default_path(&self, path: PathBuf) {
        *self
            .default_path
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(path);
    }

    pub fn default_path(&self) -> Option<PathBuf> {
        self.default_path
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Start following `path` (or the default path), replacing any active watch.
    ///
    /// Returns the path being followed, or `None` when neither was given.
    pub async fn start_monitoring(&self, path: Option<PathBuf>) -> Option<PathBuf> {
        let Some(path) = path.or_else(|| self.default_path()) else {
            warn!("No log path configured");
            self.sink
                .append(LogSource::System, "No log path configured".to_string());
            return None;
        };

        let mut watch = self.watch.lock().await;
        if let Some(previous) = watch.take() {
            cancel(previous).await;
        }

        let mut cursor = TailCursor::new();
        match cursor.read_all(&path).await {
            Ok(lines) => {
                for line in lines {
                    self.sink.append(LogSource::File, line);
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.sink.append(
                    LogSource::System,
                    format!("Log file not found, waiting for it: {}", path.display()),
                );
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to read log file"),
        }

        info!(path = %path.display(), offset = cursor.offset(), "Log monitoring started");
        self.sink.append(
            LogSource::System,
            format!("Monitoring log file: {}", path.display()),
        );

        let task = tokio::spawn(poll(
            path.clone(),
            cursor,
            self.poll_interval,
            self.sink.clone(),
        ));
        *watch = Some(Watch {
            path: path.clone(),
            task,
        });
        Some(path)
    }

    /// Stop following. Returns whether a watch was active.
    pub async fn stop_monitoring(&self) -> bool {
        let Some(previous) = self.watch.lock().await.take() else {
            return false;
        };
        let path = previous.path.clone();
        cancel(previous).await;
        info!(path = %path.display(), "Log monitoring stopped");
        self.sink.append(
            LogSource::System,
            format!("Stopped monitoring: {}", path.display()),
        );
        true
    }

    pub async fn is_monitoring(&self) -> bool {
        self.watch.lock().await.is_some()
    }

    /// The file currently followed.
    pub async fn path(&self) -> Option<PathBuf> {
        self.watch.lock().await.as_ref().map(|w| w.path.clone())
    }
}

/// Abort the poller and wait until it is gone, so it cannot emit again.
async fn cancel(watch: Watch) {
    watch.task.abort();
    let _ = watch.task.await;
    debug!(path = %watch.path.display(), "Log poller cancelled");
}

async fn poll(
    path: PathBuf,
    mut cursor: TailCursor,
    interval: Duration,
    sink: Arc<dyn LogSinkPort>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        poll_once(&path, &mut cursor, sink.as_ref()).await;
    }
}

async fn poll_once(path: &Path, cursor: &mut TailCursor, sink: &dyn LogSinkPort) {
    match cursor.read_new(path).await {
        Ok(lines) => {
            if !lines.is_empty() {
                debug!(path = %path.display(), count = lines.len(), offset = cursor.offset(), "New log lines");
            }
            for line in lines {
                sink.append(LogSource::File, line);
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if cursor.offset() > 0 {
                debug!(path = %path.display(), "Log file disappeared");
            }
            cursor.reset();
        }
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to read log file"),
    }
}
