//! Configuration management subcommands.

use std::path::PathBuf;

use clap::Subcommand;

/// Configuration management commands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective settings and where they are persisted
    Show,
    /// Persist settings into the .env file
    Set {
        /// Base URL of the conversion backend
        #[arg(long)]
        endpoint: Option<String>,
        /// Request timeout in milliseconds (0 = no timeout)
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Target language tag sent with conversions
        #[arg(long)]
        target_language: Option<String>,
        /// Interpreter used to run the backend
        #[arg(long)]
        python: Option<String>,
        /// Workspace root
        #[arg(long)]
        workspace: Option<PathBuf>,
        /// Backend entry point
        #[arg(long)]
        server_path: Option<PathBuf>,
        /// Backend log file
        #[arg(long)]
        log_path: Option<PathBuf>,
        /// Project analysed by make-vo
        #[arg(long)]
        project: Option<PathBuf>,
        /// Output directory for generated value objects
        #[arg(long)]
        output: Option<PathBuf>,
        /// Directory with previously generated value objects
        #[arg(long)]
        vo_path: Option<PathBuf>,
    },
    /// Print the path of the .env settings file
    Path,
}

impl ConfigCommand {
    /// True for a `set` without any value.
    pub const fn is_empty_set(&self) -> bool {
        matches!(
            self,
            Self::Set {
                endpoint: None,
                timeout_ms: None,
                target_language: None,
                python: None,
                workspace: None,
                server_path: None,
                log_path: None,
                project: None,
                output: None,
                vo_path: None,
            }
        )
    }
}
