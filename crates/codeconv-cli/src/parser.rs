//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line companion for a local code-conversion backend.
///
/// Global options override the environment and the `.env` settings file
/// for this invocation only.
#[derive(Parser)]
#[command(name = "codeconv")]
#[command(about = "Convert Map-based Java code to value objects through a local LLM backend")]
#[command(version)]
pub struct Cli {
    /// Base URL of the conversion backend
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in milliseconds for conversions (0 = no timeout)
    #[arg(long = "timeout-ms", global = true)]
    pub timeout_ms: Option<u64>,

    /// Workspace root used to find the backend entry point and log file
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
