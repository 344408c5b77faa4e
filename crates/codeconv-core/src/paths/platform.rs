//! Platform-specific path resolution.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::error::PathError;

/// Environment variable that overrides the data root.
pub(crate) const DATA_DIR_ENV: &str = "CODECONV_DATA_DIR";

/// Get the root directory for application data (the `.env` file).
///
/// Resolution order:
/// 1. `CODECONV_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/codeconv`), created on demand
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(path));
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    let root = data_dir.join("codeconv");

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

/// Normalize a user-provided path, expanding `~` and making it absolute.
pub fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = if trimmed.starts_with("~/") || trimmed == "~" {
        let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
        if trimmed == "~" {
            home
        } else {
            home.join(trimmed.trim_start_matches("~/"))
        }
    } else {
        PathBuf::from(trimmed)
    };

    if expanded.is_absolute() {
        Ok(lexically_normalize(&expanded))
    } else {
        let cwd = env::current_dir().map_err(|e| PathError::CurrentDirError(e.to_string()))?;
        Ok(lexically_normalize(&cwd.join(expanded)))
    }
}

/// Drop `.` components and fold `..` into its parent without touching the
/// filesystem.
pub fn lexically_normalize(path: &Path) -> PathBuf {
    let mut normal = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normal.pop() && !normal.has_root() {
                    normal.push(component);
                }
            }
            other => normal.push(other),
        }
    }
    normal
}

/// `path` made absolute against the current directory and lexically
/// normalized. Left as given if the current directory is unavailable.
pub fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).map_or_else(|_| path.to_path_buf(), |abs| lexically_normalize(&abs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rejects_blank() {
        assert!(matches!(normalize_user_path("   "), Err(PathError::EmptyPath)));
    }

    #[test]
    fn test_normalize_keeps_absolute_paths() {
        let abs = env::temp_dir().join("codeconv-project");
        let raw = abs.to_string_lossy();
        assert_eq!(normalize_user_path(&raw).unwrap(), abs);
    }

    #[test]
    fn test_dot_segments_are_folded() {
        assert_eq!(
            lexically_normalize(Path::new("/work/shop-api/src/../.")),
            PathBuf::from("/work/shop-api")
        );
        let cwd = env::current_dir().unwrap();
        assert_eq!(normalize_user_path(".").unwrap(), cwd);
        assert_eq!(absolutize(Path::new("..")), cwd.parent().unwrap().to_path_buf());
    }

    #[test]
    fn test_normalize_joins_relative_paths_to_cwd() {
        let resolved = normalize_user_path("out/generated").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("out/generated"));
    }
}
