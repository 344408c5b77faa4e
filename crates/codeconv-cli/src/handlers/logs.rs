//! Logs command handler.

use std::path::PathBuf;

use anyhow::{Context, Result};
use codeconv_core::LogSource;
use tokio::sync::broadcast::error::RecvError;

use crate::bootstrap::CliContext;
use crate::commands::LogsCommand;
use crate::presentation::format_log_entry;

pub async fn execute(ctx: &CliContext, command: LogsCommand) -> Result<()> {
    match command {
        LogsCommand::Tail { path } => tail(ctx, path).await,
    }
}

/// Print the existing lines of the log file, then new ones until Ctrl+C.
async fn tail(ctx: &CliContext, path: Option<PathBuf>) -> Result<()> {
    let mut rx = ctx.logs.subscribe();
    let Some(path) = ctx.tailer.start_monitoring(path).await else {
        anyhow::bail!("No log path configured");
    };
    eprintln!("Tailing {} (Press Ctrl+C to stop)", path.display());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            entry = rx.recv() => match entry {
                Ok(entry) if matches!(entry.source, LogSource::File | LogSource::System) => {
                    println!("{}", format_log_entry(&entry));
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => eprintln!("... {skipped} log lines skipped"),
                Err(RecvError::Closed) => break,
            },
            result = &mut ctrl_c => {
                result.context("Failed to listen for Ctrl+C")?;
                break;
            }
        }
    }

    ctx.tailer.stop_monitoring().await;
    Ok(())
}
