//! Process runtime for codeconv: the backend child process, the capture of
//! its output and the tailing of its log file.

#![deny(unused_crate_dependencies)]

pub mod logs;
pub mod process;
pub mod tail;

pub use logs::{LogEntry, LogManager, MAX_LOG_LINES, get_log_manager};
pub use process::{
    ServerConfig, ServerError, ServerEvent, ServerManager, ServerStatus, StartOutcome,
    get_server_manager,
};
pub use tail::{LogTailer, POLL_INTERVAL, get_log_tailer};

// Silence unused dev-dependency warnings
#[cfg(all(test, not(unix)))]
use tokio_test as _;
