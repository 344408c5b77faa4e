//! Config command handler.
//!
//! Settings live in the `.env` file under the data root. `set` validates the
//! merged result before anything is written.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use codeconv_core::paths::persist_env_value_at;
use codeconv_core::settings::keys;
use codeconv_core::{Settings, SettingsError, env_file_path};

use crate::bootstrap::CliContext;
use crate::config_commands::ConfigCommand;
use crate::error::CliError;
use crate::handlers::user_path;

/// Execute the config command.
pub fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<()> {
    if command.is_empty_set() {
        return Err(CliError::Usage(
            "Nothing to set. Pass at least one option, see 'codeconv config set --help'".into(),
        )
        .into());
    }

    match command {
        ConfigCommand::Show => {
            println!("Settings file: {}", env_file_path()?.display());
            println!();
            for (key, value) in ctx.settings.env_pairs() {
                let value = if value.is_empty() { "(unset)".to_string() } else { value };
                println!("{key}={value}");
            }
            println!();
            println!(
                "Effective log path: {}",
                ctx.settings.effective_log_path().display()
            );
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", env_file_path()?.display());
            Ok(())
        }
        ConfigCommand::Set {
            endpoint,
            timeout_ms,
            target_language,
            python,
            workspace,
            server_path,
            log_path,
            project,
            output,
            vo_path,
        } => {
            let mut updates: Vec<(&'static str, String)> = Vec::new();
            if let Some(endpoint) = endpoint {
                updates.push((keys::API_ENDPOINT, endpoint));
            }
            if let Some(timeout_ms) = timeout_ms {
                updates.push((keys::TIMEOUT_MS, timeout_ms.to_string()));
            }
            if let Some(target) = target_language {
                updates.push((keys::TARGET_LANGUAGE, target));
            }
            if let Some(python) = python {
                updates.push((keys::PYTHON, python));
            }
            for (key, path) in [
                (keys::WORKSPACE, workspace),
                (keys::SERVER_PATH, server_path),
                (keys::LOG_PATH, log_path),
                (keys::PROJECT_PATH, project),
                (keys::OUTPUT_PATH, output),
                (keys::VO_PATH, vo_path),
            ] {
                if let Some(path) = path {
                    updates.push((key, user_path(&path)?.display().to_string()));
                }
            }

            let env_path = env_file_path()?;
            apply_updates(&ctx.settings, &env_path, &updates)?;
            for (key, value) in &updates {
                println!("✓ {key}={value}");
            }
            println!("Saved to {}", env_path.display());
            Ok(())
        }
    }
}

/// Settings with `updates` applied on top of `current`, validated.
pub fn merged_settings(
    current: &Settings,
    updates: &[(&'static str, String)],
) -> Result<Settings, SettingsError> {
    let mut pairs: HashMap<&str, String> = current.env_pairs().into_iter().collect();
    for (key, value) in updates {
        pairs.insert(*key, value.clone());
    }
    Settings::from_lookup(&current.workspace_root, |key| pairs.get(key).cloned())
}

/// Validate `updates` against `current`, then persist them into `env_path`.
///
/// Nothing is written when validation fails.
pub fn apply_updates(
    current: &Settings,
    env_path: &Path,
    updates: &[(&'static str, String)],
) -> Result<Settings> {
    let merged = merged_settings(current, updates)?;
    for (key, value) in updates {
        persist_env_value_at(env_path, key, value)?;
    }
    Ok(merged)
}
