//! Command handlers for the one-shot subcommands.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Validate CLI-specific input
//!   2. Call the core services or the runtime managers
//!   3. Format output for the terminal
//!
//! Results go to stdout, progress and summaries to stderr, so a converted
//! file or generated VO code can be piped straight into another tool.

use std::path::{Path, PathBuf};

use anyhow::Result;
use codeconv_core::normalize_user_path;

pub mod config;
pub mod convert;
pub mod health;
pub mod logs;
pub mod make_vo;
pub mod panels;
pub mod server;

/// A user-supplied path made absolute against the current directory, with
/// `~`, `.` and `..` resolved.
pub fn user_path(path: &Path) -> Result<PathBuf> {
    Ok(normalize_user_path(&path.to_string_lossy())?)
}
