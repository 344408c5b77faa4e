//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: panel models and log entries come in,
//! strings go out. Printing is left to the handlers and the session.

pub mod logs;
pub mod panels;

pub use logs::format_log_entry;
pub use panels::{render_panel, truncate_string};
