//! CLI command definitions.
//!
//! This module defines all available subcommands and their arguments.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config_commands::ConfigCommand;

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check whether the backend answers on /health
    Health,

    /// Convert a line range of a file and print the result
    Convert {
        /// File holding the code to convert
        file: PathBuf,
        /// First line of the selection (1-based)
        #[arg(long, short = 's')]
        start: u32,
        /// Last line of the selection (inclusive)
        #[arg(long, short = 'e')]
        end: u32,
        /// Language of the source file, if the backend should not guess
        #[arg(long)]
        source_language: Option<String>,
        /// Target language tag (defaults to the configured one)
        #[arg(long)]
        target_language: Option<String>,
        /// Directory with previously generated value objects
        #[arg(long)]
        vo_path: Option<PathBuf>,
        /// Write the converted file here instead of printing it
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Generate value-object classes for a whole project
    MakeVo {
        /// Project directory (defaults to the configured project path)
        #[arg(long, short = 'p')]
        project: Option<PathBuf>,
        /// Output directory (defaults to the configured one, then <project>/generated)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Run the backend server in the foreground
    Server {
        #[command(subcommand)]
        command: ServerCommand,
    },

    /// Follow the backend log file
    Logs {
        #[command(subcommand)]
        command: LogsCommand,
    },

    /// Render the VO generator and code converter panels
    Panels,

    /// View or change persisted settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Interactive session (the default when no subcommand is given)
    Session,
}

/// Backend server command variants.
#[derive(Subcommand)]
pub enum ServerCommand {
    /// Start the backend, stream its output and stop it on Ctrl-C
    Run {
        /// Entry point to launch instead of probing the workspace
        #[arg(long)]
        entry: Option<PathBuf>,
    },
}

/// Log command variants.
#[derive(Subcommand)]
pub enum LogsCommand {
    /// Print new lines of the log file until Ctrl-C
    Tail {
        /// Log file (defaults to the configured log path)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}
