//! Byte cursor over a growing log file.

use std::io::{self, SeekFrom};
use std::path::Path;
use std::time::SystemTime;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::process::trim_line_ending;

/// Split raw bytes into non-empty lines, decoding lossily.
///
/// A trailing partial line (no final newline) is returned as-is.
pub fn split_lines(bytes: &[u8]) -> Vec<String> {
    bytes
        .split_inclusive(|b| *b == b'\n')
        .filter_map(|chunk| {
            let mut line = chunk.to_vec();
            trim_line_ending(&mut line);
            if line.is_empty() {
                None
            } else {
                Some(String::from_utf8_lossy(&line).into_owned())
            }
        })
        .collect()
}

/// Position in a log file plus the last observed size/mtime.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TailCursor {
    offset: u64,
    last_seen: Option<(u64, Option<SystemTime>)>,
}

impl TailCursor {
    pub const fn new() -> Self {
        Self {
            offset: 0,
            last_seen: None,
        }
    }

    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Forget the position, e.g. because the file disappeared.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.last_seen = None;
    }

    /// Read the whole current file and move the cursor to its end.
    pub async fn read_all(&mut self, path: &Path) -> io::Result<Vec<String>> {
        self.reset();
        self.read_new(path).await
    }

    /// Read lines appended since the last call.
    ///
    /// Returns nothing when neither size nor mtime changed. A file that
    /// shrank was truncated or rotated and is read again from the start.
    pub async fn read_new(&mut self, path: &Path) -> io::Result<Vec<String>> {
        let metadata = tokio::fs::metadata(path).await?;
        let size = metadata.len();
        let seen = (size, metadata.modified().ok());
        if self.last_seen == Some(seen) {
            return Ok(Vec::new());
        }

        if size < self.offset {
            self.offset = 0;
        }
        if size == self.offset {
            self.last_seen = Some(seen);
            return Ok(Vec::new());
        }

        // A failed read leaves `last_seen` alone so the next poll retries
        let mut file = File::open(path).await?;
        file.seek(SeekFrom::Start(self.offset)).await?;
        let mut bytes = Vec::new();
        file.take(size - self.offset).read_to_end(&mut bytes).await?;

        self.offset += bytes.len() as u64;
        self.last_seen = Some(seen);
        Ok(split_lines(&bytes))
    }
}
