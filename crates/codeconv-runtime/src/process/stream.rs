//! Async stream log readers (non-UTF8-safe).
//!
//! The backend and the libraries it loads can emit non-UTF8 bytes on
//! stdout/stderr. `BufReader::lines()` would end the reader on the first
//! invalid sequence, so lines are read as bytes and decoded lossily.

use std::sync::Arc;

use codeconv_core::ports::{LogSinkPort, LogSource};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

/// Strip one trailing `\n` and an optional `\r` before it.
pub(crate) fn trim_line_ending(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}

/// Forward every line of `stream` to `sink` until EOF or a read error.
pub fn spawn_stream_reader(
    stream: impl AsyncRead + Unpin + Send + 'static,
    pid: u32,
    source: LogSource,
    sink: Arc<dyn LogSinkPort>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut buf: Vec<u8> = Vec::with_capacity(1024);

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break, // EOF
                Ok(_) => {
                    trim_line_ending(&mut buf);
                    sink.append(source, String::from_utf8_lossy(&buf).into_owned());
                }
                Err(e) => {
                    debug!(pid, %source, error = %e, "log stream reader exiting due to read error");
                    break;
                }
            }
        }

        debug!(pid, %source, "log stream reader task exiting");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::LogManager;

    #[test]
    fn test_trim_line_ending() {
        let mut crlf = b"hello\r\n".to_vec();
        trim_line_ending(&mut crlf);
        assert_eq!(crlf, b"hello");

        let mut bare = b"no newline".to_vec();
        trim_line_ending(&mut bare);
        assert_eq!(bare, b"no newline");
    }

    #[tokio::test]
    async fn test_reader_survives_invalid_utf8() {
        let manager = Arc::new(LogManager::new());
        let input: &[u8] = b"first\n\xff\xfebroken\nlast";

        spawn_stream_reader(input, 1, LogSource::Stdout, manager.clone())
            .await
            .unwrap();

        let lines: Vec<_> = manager.entries().into_iter().map(|e| e.line).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "first");
        assert!(lines[1].ends_with("broken"));
        assert_eq!(lines[2], "last");
    }
}
