//! CLI entry point.
//!
//! Loads the settings files, wires the context through bootstrap and
//! dispatches to a handler. No subcommand starts the interactive session.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use codeconv_cli::handlers::convert::ConvertArgs;
use codeconv_cli::{Cli, CliConfig, CliContext, CliError, Commands, bootstrap, handlers, session};
use codeconv_core::env_file_path;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `.env` in the working directory first, then the one under the data root.
/// Values already in the environment are never overridden.
fn load_env_files() {
    dotenvy::dotenv().ok();
    if let Ok(path) = env_file_path()
        && path.exists()
        && let Err(e) = dotenvy::from_path(&path)
    {
        debug!(path = %path.display(), error = %e, "Failed to load settings file");
    }
}

async fn dispatch(ctx: CliContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Health => handlers::health::execute(&ctx).await,
        Commands::Convert {
            file,
            start,
            end,
            source_language,
            target_language,
            vo_path,
            output,
        } => {
            let args = ConvertArgs {
                file,
                start,
                end,
                source_language,
                target_language,
                vo_path,
                output,
            };
            handlers::convert::execute(&ctx, args).await
        }
        Commands::MakeVo { project, output } => {
            handlers::make_vo::execute(&ctx, project, output).await
        }
        Commands::Server { command } => handlers::server::execute(&ctx, command).await,
        Commands::Logs { command } => handlers::logs::execute(&ctx, command).await,
        Commands::Panels => handlers::panels::execute(&ctx).await,
        Commands::Config { command } => handlers::config::execute(&ctx, command),
        Commands::Session => session::run(ctx).await,
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_env(&cli)?;
    let ctx = bootstrap(config)?;
    dispatch(ctx, cli.command.unwrap_or(Commands::Session)).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    load_env_files();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let err = CliError::classify(&err);
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
