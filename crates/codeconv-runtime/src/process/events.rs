//! Backend lifecycle events.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Lifecycle change of the backend process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// The process was spawned.
    Started { pid: u32, entry_point: PathBuf },
    /// The process was stopped on request.
    Stopped { pid: u32 },
    /// The process exited on its own.
    Exited { pid: u32, code: Option<i32> },
    /// The interpreter could not be launched.
    SpawnFailed { reason: String },
}

impl ServerEvent {
    pub const fn pid(&self) -> Option<u32> {
        match self {
            Self::Started { pid, .. } | Self::Stopped { pid } | Self::Exited { pid, .. } => {
                Some(*pid)
            }
            Self::SpawnFailed { .. } => None,
        }
    }
}
