//! Path resolution for codeconv data and configuration files.
//!
//! Public API:
//! - [`data_root`] - where the `.env` settings file lives
//! - [`env_file_path`] / [`persist_env_value`] - user overrides
//! - [`normalize_user_path`] - `~` expansion and absolutisation of user input
//! - [`absolutize`] - absolutisation of configured paths

mod config;
mod error;
mod platform;

pub use config::{env_file_path, persist_env_value, persist_env_value_at};
pub use error::PathError;
pub use platform::{absolutize, data_root, lexically_normalize, normalize_user_path};
