//! Log sink port for backend output capture.
//!
//! Abstracts the destination of backend stdout/stderr lines and tailed
//! log-file lines, the terminal counterpart of an editor output channel.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a log line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSource {
    Stdout,
    Stderr,
    /// A line tailed from the backend's log file.
    File,
    /// Lifecycle notices emitted by codeconv itself.
    System,
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
            Self::File => "file",
            Self::System => "system",
        };
        f.write_str(label)
    }
}

/// Port for appending log lines to a sink.
///
/// Implementations must be thread-safe and must not block.
pub trait LogSinkPort: Send + Sync {
    /// Append one line (without trailing newline).
    fn append(&self, source: LogSource, line: String);
}
