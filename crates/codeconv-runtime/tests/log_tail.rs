//! Log tailing against real files.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use codeconv_core::LogSource;
use codeconv_runtime::{LogManager, LogTailer};
use tempfile::tempdir;

const POLL: Duration = Duration::from_millis(50);

fn append(path: &Path, text: &str) {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    file.write_all(text.as_bytes()).unwrap();
}

fn file_lines(logs: &LogManager) -> Vec<String> {
    logs.entries()
        .into_iter()
        .filter(|e| e.source == LogSource::File)
        .map(|e| e.line)
        .collect()
}

async fn wait_for_lines(logs: &LogManager, expected: &[&str]) -> Vec<String> {
    for _ in 0..100 {
        if file_lines(logs).len() >= expected.len() {
            break;
        }
        tokio::time::sleep(POLL).await;
    }
    file_lines(logs)
}

#[tokio::test]
async fn growth_emits_only_appended_lines() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("server.log");
    append(&path, "INFO: started\n");

    let logs = Arc::new(LogManager::new());
    let tailer = LogTailer::with_poll_interval(logs.clone(), POLL);
    tailer.start_monitoring(Some(path.clone())).await.unwrap();
    assert_eq!(file_lines(&logs), ["INFO: started"]);

    append(&path, "INFO: GET /health 200\n\nINFO: POST /convert-code 200\n");
    let lines = wait_for_lines(
        &logs,
        &["INFO: started", "INFO: GET /health 200", "INFO: POST /convert-code 200"],
    )
    .await;
    assert_eq!(
        lines,
        ["INFO: started", "INFO: GET /health 200", "INFO: POST /convert-code 200"]
    );

    // Nothing is emitted twice across further polls
    tokio::time::sleep(POLL * 4).await;
    assert_eq!(file_lines(&logs).len(), 3);
    assert!(tailer.stop_monitoring().await);
}

#[tokio::test]
async fn restarting_cancels_the_previous_watch() {
    let temp = tempdir().unwrap();
    let first = temp.path().join("first.log");
    let second = temp.path().join("second.log");
    append(&first, "");
    append(&second, "");

    let logs = Arc::new(LogManager::new());
    let tailer = LogTailer::with_poll_interval(logs.clone(), POLL);
    tailer.start_monitoring(Some(first.clone())).await;
    tailer.start_monitoring(Some(second.clone())).await;
    assert_eq!(tailer.path().await, Some(second.clone()));

    append(&first, "stale\n");
    append(&second, "fresh\n");
    let lines = wait_for_lines(&logs, &["fresh"]).await;
    tokio::time::sleep(POLL * 4).await;

    assert_eq!(lines, ["fresh"]);
    assert_eq!(file_lines(&logs), ["fresh"]);
}

#[tokio::test]
async fn missing_file_is_picked_up_when_it_appears() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("logs").join("server.log");

    let logs = Arc::new(LogManager::new());
    let tailer = LogTailer::with_poll_interval(logs.clone(), POLL);
    tailer.start_monitoring(Some(path.clone())).await;
    assert!(tailer.is_monitoring().await);
    assert!(file_lines(&logs).is_empty());

    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    append(&path, "first line\n");

    assert_eq!(wait_for_lines(&logs, &["first line"]).await, ["first line"]);
    tailer.stop_monitoring().await;
}

#[tokio::test]
async fn stop_reports_whether_a_watch_was_active() {
    let logs = Arc::new(LogManager::new());
    let tailer = LogTailer::with_poll_interval(logs, POLL);
    assert!(!tailer.stop_monitoring().await);
    assert_eq!(tailer.start_monitoring(None).await, None);

    let temp = tempdir().unwrap();
    tailer.set_default_path(temp.path().join("server.log"));
    assert_eq!(
        tailer.start_monitoring(None).await,
        Some(temp.path().join("server.log"))
    );
    assert!(tailer.stop_monitoring().await);
    assert!(!tailer.is_monitoring().await);
}
