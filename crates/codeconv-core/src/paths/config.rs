//! Configuration file utilities.
//!
//! Reads and writes the `.env` file that stores user configuration
//! overrides. The CLI loads it with `dotenvy` at startup.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::PathError;
use super::platform::data_root;

/// Location of the `.env` file that stores user overrides.
pub fn env_file_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(".env"))
}

/// Persist a key=value pair into the `.env` file under the data root.
pub fn persist_env_value(key: &str, value: &str) -> Result<(), PathError> {
    persist_env_value_at(&env_file_path()?, key, value)
}

/// Persist a key=value pair into the env file at `env_path`.
///
/// If the key already exists, its value is updated in place (later
/// duplicates are dropped). Otherwise it is appended.
pub fn persist_env_value_at(env_path: &Path, key: &str, value: &str) -> Result<(), PathError> {
    let env_err = |e: std::io::Error| PathError::EnvFileError {
        path: env_path.to_path_buf(),
        reason: e.to_string(),
    };

    let lines: Vec<String> = if env_path.exists() {
        fs::read_to_string(env_path)
            .map_err(env_err)?
            .lines()
            .map(std::string::ToString::to_string)
            .collect()
    } else {
        Vec::new()
    };

    let mut updated = false;
    let mut output: Vec<String> = Vec::with_capacity(lines.len() + 1);

    for line in lines {
        match line.split_once('=') {
            Some((lhs, _)) if lhs.trim() == key => {
                if !updated {
                    output.push(format!("{key}={value}"));
                    updated = true;
                }
            }
            _ => output.push(line),
        }
    }

    if !updated {
        output.push(format!("{key}={value}"));
    }

    if let Some(parent) = env_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(env_err)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(env_path)
        .map_err(env_err)?;

    let mut content = output.join("\n");
    content.push('\n');
    file.write_all(content.as_bytes()).map_err(env_err)?;

    Ok(())
}
