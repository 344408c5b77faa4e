//! Project scanning and value-object file output.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::paths::absolutize;

/// Source extensions counted towards a project's file count.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "java", "cpp", "c", "cs", "go", "rs", "php",
];

/// Directory names never descended into.
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".vscode",
    "__pycache__",
    "out",
    "dist",
];

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Count source files under `root`.
///
/// A missing root counts as zero. Entries that cannot be read are skipped.
pub fn count_source_files(root: &Path) -> u64 {
    if !root.exists() {
        return 0;
    }

    let mut count = 0;
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
    {
        match entry {
            Ok(entry) if entry.file_type().is_file() && has_source_extension(entry.path()) => {
                count += 1;
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "Skipping unreadable project entry"),
        }
    }
    count
}

/// The project directory name with every non-alphanumeric character
/// replaced by `_`.
///
/// The name is taken from the absolute path, so `.` and `..` name the
/// directories they point at.
pub fn sanitize_project_name(project_path: &Path) -> String {
    absolutize(project_path)
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// File name of the generated value-object class for a project.
pub fn vo_file_name(project_path: &Path) -> String {
    format!("{}VO.java", sanitize_project_name(project_path))
}

/// Write `vo_code` into `<output_dir>/<project>VO.java`.
///
/// The output directory is created if missing. Returns the written path.
pub fn save_vo_file(
    output_dir: &Path,
    project_path: &Path,
    vo_code: &str,
) -> std::io::Result<PathBuf> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir).inspect_err(|e| {
            warn!(path = %output_dir.display(), error = %e, "Failed to create VO output directory");
        })?;
    }

    let file_path = output_dir.join(vo_file_name(project_path));
    fs::write(&file_path, vo_code)?;
    debug!(path = %file_path.display(), bytes = vo_code.len(), "Saved VO file");
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_project_name() {
        assert_eq!(sanitize_project_name(Path::new("/work/my-shop app")), "my_shop_app");
        assert_eq!(sanitize_project_name(Path::new("/work/cvt.v2/")), "cvt_v2");
        assert_eq!(vo_file_name(Path::new("/work/Fund")), "FundVO.java");
    }

    #[test]
    fn test_relative_project_names_resolve() {
        let cwd = std::env::current_dir().unwrap();
        let here = sanitize_project_name(&cwd);
        assert!(!here.is_empty());
        assert_eq!(sanitize_project_name(Path::new(".")), here);
        assert_eq!(vo_file_name(Path::new(".")), format!("{here}VO.java"));
        assert_eq!(
            sanitize_project_name(Path::new("..")),
            sanitize_project_name(cwd.parent().unwrap())
        );
        assert_eq!(
            vo_file_name(Path::new("/work/shop-api/src/..")),
            "shop_apiVO.java"
        );
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        assert!(has_source_extension(Path::new("Main.JAVA")));
        assert!(has_source_extension(Path::new("a/b/c.Rs")));
        assert!(!has_source_extension(Path::new("README.md")));
        assert!(!has_source_extension(Path::new("Makefile")));
    }

    #[test]
    fn test_missing_root_counts_zero() {
        let temp = tempdir().unwrap();
        assert_eq!(count_source_files(&temp.path().join("nope")), 0);
    }

    #[test]
    fn test_save_vo_file_creates_output_dir() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("generated").join("vo");
        let path = save_vo_file(&out, Path::new("/projects/shop-api"), "class X {}").unwrap();
        assert_eq!(path, out.join("shop_apiVO.java"));
        assert_eq!(fs::read_to_string(path).unwrap(), "class X {}");
    }
}
