//! Locating the backend entry point.

use std::path::{Path, PathBuf};

use codeconv_core::absolutize;

use super::error::ServerError;

/// Paths tried under the workspace root, in order.
pub const ENTRY_POINT_CANDIDATES: &[&str] = &[
    "server.py",
    "backend/server.py",
    "server/server.py",
    "api/server.py",
    "src/server.py",
];

/// Resolve the entry point to launch.
///
/// An explicit path wins and must exist; relative paths are taken against
/// the workspace root. Without one the fixed candidate list is searched.
///
/// The result is always absolute: the backend runs with its own directory
/// as working directory.
pub fn resolve_entry_point(
    workspace_root: &Path,
    explicit: Option<&Path>,
) -> Result<PathBuf, ServerError> {
    let workspace_root = &absolutize(workspace_root);
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            workspace_root.join(path)
        };
        return if path.is_file() {
            Ok(path)
        } else {
            Err(ServerError::EntryPointMissing(path))
        };
    }

    ENTRY_POINT_CANDIDATES
        .iter()
        .map(|candidate| workspace_root.join(candidate))
        .find(|path| path.is_file())
        .ok_or_else(|| ServerError::EntryPointNotFound {
            workspace: workspace_root.to_path_buf(),
            candidates: ENTRY_POINT_CANDIDATES.join(", "),
        })
}
