//! Server command handler.
//!
//! Runs the backend in the foreground: its stdout/stderr and lifecycle
//! notices are printed as they arrive until Ctrl+C or until it exits.

use std::path::PathBuf;

use anyhow::{Context, Result};
use codeconv_runtime::{ServerEvent, StartOutcome};
use tokio::sync::broadcast::error::RecvError;

use crate::bootstrap::CliContext;
use crate::commands::ServerCommand;
use crate::error::CliError;
use crate::presentation::format_log_entry;

pub async fn execute(ctx: &CliContext, command: ServerCommand) -> Result<()> {
    match command {
        ServerCommand::Run { entry } => run(ctx, entry).await,
    }
}

async fn run(ctx: &CliContext, entry: Option<PathBuf>) -> Result<()> {
    // Subscribe first so the first lines of output are not missed
    let mut logs = ctx.logs.subscribe();
    let mut events = ctx.servers.subscribe();

    let entry = entry.or_else(|| ctx.entry_override());
    let outcome = ctx.servers.start_server(entry.as_deref()).await?;
    let pid = outcome.pid();
    match &outcome {
        StartOutcome::Started { entry_point, .. } => {
            eprintln!("✓ Server started (pid {pid}): {}", entry_point.display());
        }
        StartOutcome::AlreadyRunning { .. } => {
            eprintln!("Server is already running (pid {pid})");
        }
    }
    eprintln!("Press Ctrl+C to stop");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            entry = logs.recv() => match entry {
                Ok(entry) => println!("{}", format_log_entry(&entry)),
                Err(RecvError::Lagged(skipped)) => eprintln!("... {skipped} log lines skipped"),
                Err(RecvError::Closed) => break,
            },
            event = events.recv() => match event {
                Ok(ServerEvent::Exited { pid: exited, code }) if exited == pid => {
                    while let Ok(entry) = logs.try_recv() {
                        println!("{}", format_log_entry(&entry));
                    }
                    return match code {
                        Some(0) => {
                            eprintln!("Server exited");
                            Ok(())
                        }
                        other => Err(CliError::Process(format!(
                            "Server exited unexpectedly (pid {pid}, code {})",
                            other.map_or_else(|| "none".to_string(), |c| c.to_string())
                        ))
                        .into()),
                    };
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
            result = &mut ctrl_c => {
                result.context("Failed to listen for Ctrl+C")?;
                eprintln!("Stopping server...");
                ctx.servers.stop_server().await;
                break;
            }
        }
    }
    Ok(())
}
