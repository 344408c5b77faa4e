//! A line selection inside a source file.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while building a [`Selection`].
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Invalid line range {start}-{end}: lines are 1-based and start must not exceed end")]
    InvalidRange { start: u32, end: u32 },

    #[error("Line {line} is past the end of {path} ({total} lines)")]
    OutOfBounds {
        path: PathBuf,
        line: u32,
        total: usize,
    },

    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },
}

/// The full text of a file plus an inclusive, 1-based line range in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub file_path: PathBuf,
    pub content: String,
    pub start_line: u32,
    pub end_line: u32,
}

impl Selection {
    /// Build a selection over in-memory content.
    pub fn new(
        file_path: impl Into<PathBuf>,
        content: impl Into<String>,
        start_line: u32,
        end_line: u32,
    ) -> Result<Self, SelectionError> {
        if start_line == 0 || start_line > end_line {
            return Err(SelectionError::InvalidRange {
                start: start_line,
                end: end_line,
            });
        }

        let selection = Self {
            file_path: file_path.into(),
            content: content.into(),
            start_line,
            end_line,
        };

        let total = selection.content.lines().count().max(1);
        if start_line as usize > total {
            return Err(SelectionError::OutOfBounds {
                path: selection.file_path,
                line: start_line,
                total,
            });
        }

        Ok(selection)
    }

    /// Read `path` and select `start_line..=end_line` in it.
    pub fn from_file(path: &Path, start_line: u32, end_line: u32) -> Result<Self, SelectionError> {
        let content = std::fs::read_to_string(path).map_err(|e| SelectionError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::new(path, content, start_line, end_line)
    }

    /// The selected lines, clamped to the end of the file.
    pub fn selected_text(&self) -> String {
        let skip = (self.start_line - 1) as usize;
        let take = (self.end_line - self.start_line + 1) as usize;
        self.content
            .lines()
            .skip(skip)
            .take(take)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True when the selected lines hold nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.selected_text().trim().is_empty()
    }

    pub fn file_path_string(&self) -> String {
        self.file_path.to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "class A {\n    Map m = new HashMap();\n\n    void f() {}\n}\n";

    #[test]
    fn test_selected_text_is_inclusive() {
        let sel = Selection::new("A.java", SOURCE, 2, 4).unwrap();
        assert_eq!(sel.selected_text(), "    Map m = new HashMap();\n\n    void f() {}");
        assert!(!sel.is_empty());
    }

    #[test]
    fn test_blank_line_selection_is_empty() {
        let sel = Selection::new("A.java", SOURCE, 3, 3).unwrap();
        assert!(sel.is_empty());
    }

    #[test]
    fn test_end_past_eof_is_clamped() {
        let sel = Selection::new("A.java", SOURCE, 5, 40).unwrap();
        assert_eq!(sel.selected_text(), "}");
    }

    #[test]
    fn test_rejects_zero_and_reversed_ranges() {
        assert!(matches!(
            Selection::new("A.java", SOURCE, 0, 2),
            Err(SelectionError::InvalidRange { .. })
        ));
        assert!(matches!(
            Selection::new("A.java", SOURCE, 4, 2),
            Err(SelectionError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_rejects_start_past_eof() {
        assert!(matches!(
            Selection::new("A.java", SOURCE, 9, 9),
            Err(SelectionError::OutOfBounds { total: 5, .. })
        ));
    }
}
