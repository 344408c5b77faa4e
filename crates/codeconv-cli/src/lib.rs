//! Command-line interface for codeconv.
//!
//! One-shot subcommands for scripts, plus an interactive session that keeps
//! the panels, the backend process and the log tail alive between commands.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only
use dotenvy as _;
use tracing_subscriber as _;

#[cfg(test)]
use tokio_test as _;

pub mod bootstrap;
pub mod commands;
pub mod config_commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod session;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, LogsCommand, ServerCommand};
pub use config_commands::ConfigCommand;
pub use error::CliError;
pub use parser::Cli;
pub use session::{Session, SessionCommand};
