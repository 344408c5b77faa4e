//! Formatting of captured log entries.

use chrono::{Local, TimeZone};
use codeconv_runtime::LogEntry;

/// `[HH:MM:SS] [source] line`, in local time.
pub fn format_log_entry(entry: &LogEntry) -> String {
    let time = Local
        .timestamp_millis_opt(entry.timestamp_ms)
        .single()
        .map_or_else(|| "--:--:--".to_string(), |t| t.format("%H:%M:%S").to_string());
    format!("[{time}] [{}] {}", entry.source, entry.line)
}
