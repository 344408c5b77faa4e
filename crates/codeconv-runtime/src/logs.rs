//! Backend log capture.
//!
//! Every line the backend prints, every line tailed from its log file and
//! every lifecycle notice ends up here: in a bounded ring buffer for later
//! inspection and on a broadcast channel for live display.

use std::collections::VecDeque;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use chrono::Utc;
use codeconv_core::ports::{LogSinkPort, LogSource};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Maximum number of log lines kept in the ring buffer.
pub const MAX_LOG_LINES: usize = 5000;

const BROADCAST_CAPACITY: usize = 1000;

/// Global log manager instance
static LOG_MANAGER: LazyLock<Arc<LogManager>> = LazyLock::new(|| Arc::new(LogManager::new()));

/// Get the global log manager
pub fn get_log_manager() -> Arc<LogManager> {
    LOG_MANAGER.clone()
}

/// A single captured line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unix timestamp in milliseconds
    pub timestamp_ms: i64,
    pub source: LogSource,
    pub line: String,
}

impl LogEntry {
    /// Create a new entry stamped with the current time.
    pub fn new(source: LogSource, line: String) -> Self {
        Self {
            timestamp_ms: Utc::now().timestamp_millis(),
            source,
            line,
        }
    }
}

/// Ring buffer of recent entries.
#[derive(Debug)]
struct LogBuffer {
    lines: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(MAX_LOG_LINES)),
            capacity,
        }
    }

    fn push(&mut self, entry: LogEntry) {
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(entry);
    }
}

/// Buffers log lines and fans them out to subscribers.
pub struct LogManager {
    buffer: RwLock<LogBuffer>,
    broadcast_tx: broadcast::Sender<LogEntry>,
}

impl LogManager {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_LINES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            buffer: RwLock::new(LogBuffer::new(capacity.max(1))),
            broadcast_tx,
        }
    }

    /// Add a line (sync - can be called from any thread).
    pub fn add(&self, source: LogSource, line: impl Into<String>) {
        let entry = LogEntry::new(source, line.into());
        self.buffer
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());

        // No receivers is fine
        let _ = self.broadcast_tx.send(entry);
    }

    /// All buffered entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.buffer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .lines
            .iter()
            .cloned()
            .collect()
    }

    /// The last `n` buffered entries, oldest first.
    pub fn tail(&self, n: usize) -> Vec<LogEntry> {
        let buffer = self.buffer.read().unwrap_or_else(PoisonError::into_inner);
        let skip = buffer.lines.len().saturating_sub(n);
        buffer.lines.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.buffer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .lines
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.buffer
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .lines
            .clear();
    }

    /// Get a broadcast receiver for new entries.
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.broadcast_tx.subscribe()
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSinkPort for LogManager {
    fn append(&self, source: LogSource, line: String) {
        self.add(source, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let manager = LogManager::with_capacity(3);
        for i in 0..5 {
            manager.add(LogSource::Stdout, format!("line {i}"));
        }

        let lines: Vec<_> = manager.entries().into_iter().map(|e| e.line).collect();
        assert_eq!(lines, ["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_tail_and_clear() {
        let manager = LogManager::new();
        manager.add(LogSource::Stdout, "a");
        manager.add(LogSource::Stderr, "b");
        manager.add(LogSource::File, "c");

        let tail = manager.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].source, LogSource::Stderr);
        assert_eq!(tail[1].line, "c");
        assert_eq!(manager.tail(10).len(), 3);

        manager.clear();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_subscribers_receive_entries() {
        let manager = LogManager::new();
        let mut rx = manager.subscribe();
        manager.append(LogSource::System, "Server started".to_string());

        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.source, LogSource::System);
        assert_eq!(entry.line, "Server started");
    }

    #[test]
    fn test_entry_serialization() {
        let entry = LogEntry::new(LogSource::Stderr, "Traceback".to_string());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"source\":\"stderr\""));
        assert!(json.contains("\"line\":\"Traceback\""));
    }
}
