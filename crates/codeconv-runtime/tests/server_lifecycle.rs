//! Backend lifecycle against real child processes.
//!
//! The "interpreter" is `sh` and the entry points are small shell scripts.

#![cfg(unix)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use codeconv_core::LogSource;
use codeconv_runtime::{
    LogManager, ServerConfig, ServerError, ServerEvent, ServerManager, ServerStatus, StartOutcome,
};
use tempfile::{TempDir, tempdir};

const LONG_RUNNING: &str = "echo booting\necho oops >&2\nexec sleep 30\n";

fn workspace(script: &str) -> TempDir {
    let temp = tempdir().unwrap();
    std::fs::write(temp.path().join("server.py"), script).unwrap();
    temp
}

fn manager(root: &Path, logs: Arc<LogManager>) -> ServerManager {
    ServerManager::new(
        ServerConfig {
            python: "sh".to_string(),
            workspace_root: root.to_path_buf(),
            restart_delay: Duration::from_millis(50),
        },
        logs,
    )
}

async fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}

#[tokio::test]
async fn start_is_idempotent_and_stop_is_safe() {
    let ws = workspace(LONG_RUNNING);
    let manager = manager(ws.path(), Arc::new(LogManager::new()));

    let first = manager.start_server(None).await.unwrap();
    let StartOutcome::Started { pid, entry_point } = first else {
        panic!("expected a fresh start, got {first:?}");
    };
    assert_eq!(entry_point, ws.path().join("server.py"));

    let second = manager.start_server(None).await.unwrap();
    assert_eq!(second, StartOutcome::AlreadyRunning { pid });
    assert_eq!(manager.status().await.pid(), Some(pid));

    assert!(manager.stop_server().await);
    assert_eq!(manager.status().await, ServerStatus::Stopped);

    assert!(!manager.stop_server().await);
    assert_eq!(manager.status().await, ServerStatus::Stopped);
}

#[tokio::test]
async fn child_output_reaches_the_sink() {
    let ws = workspace(LONG_RUNNING);
    let logs = Arc::new(LogManager::new());
    let manager = manager(ws.path(), logs.clone());

    manager.start_server(None).await.unwrap();
    let captured = wait_for(|| {
        let entries = logs.entries();
        entries
            .iter()
            .any(|e| e.source == LogSource::Stdout && e.line == "booting")
            && entries
                .iter()
                .any(|e| e.source == LogSource::Stderr && e.line == "oops")
    })
    .await;
    manager.stop_server().await;

    assert!(captured, "backend output was not captured: {:?}", logs.entries());
}

#[tokio::test]
async fn natural_exit_clears_the_handle() {
    let ws = workspace("echo done\n");
    let manager = manager(ws.path(), Arc::new(LogManager::new()));
    let mut events = manager.subscribe();

    let pid = manager.start_server(None).await.unwrap().pid();
    assert!(matches!(events.recv().await.unwrap(), ServerEvent::Started { .. }));
    assert_eq!(
        events.recv().await.unwrap(),
        ServerEvent::Exited {
            pid,
            code: Some(0)
        }
    );
    assert!(!manager.is_running().await);

    // A new start is possible afterwards
    let again = manager.start_server(None).await.unwrap();
    assert!(matches!(again, StartOutcome::Started { .. }));
}

#[tokio::test]
async fn restart_replaces_the_process() {
    let ws = workspace(LONG_RUNNING);
    let manager = manager(ws.path(), Arc::new(LogManager::new()));

    let before = manager.start_server(None).await.unwrap().pid();
    let after = manager.restart_server(None).await.unwrap();
    assert!(matches!(after, StartOutcome::Started { .. }));
    assert_ne!(after.pid(), before);
    assert_eq!(manager.status().await.pid(), Some(after.pid()));

    manager.stop_server().await;
}

#[tokio::test]
async fn spawn_failure_holds_nothing() {
    let ws = workspace(LONG_RUNNING);
    let manager = ServerManager::new(
        ServerConfig {
            python: "/nonexistent/bin/python3".to_string(),
            workspace_root: ws.path().to_path_buf(),
            restart_delay: Duration::from_millis(50),
        },
        Arc::new(LogManager::new()),
    );

    let err = manager.start_server(None).await.unwrap_err();
    assert!(matches!(err, ServerError::SpawnFailed { .. }));
    assert_eq!(manager.status().await, ServerStatus::Stopped);
}

#[tokio::test]
async fn missing_entry_point_is_reported() {
    let temp = tempdir().unwrap();
    let manager = manager(temp.path(), Arc::new(LogManager::new()));

    let err = manager.start_server(None).await.unwrap_err();
    assert!(matches!(err, ServerError::EntryPointNotFound { .. }));

    std::fs::write(temp.path().join("custom.sh"), LONG_RUNNING).unwrap();
    let outcome = manager
        .start_server(Some(Path::new("custom.sh")))
        .await
        .unwrap();
    assert!(matches!(outcome, StartOutcome::Started { .. }));
    manager.stop_server().await;
}

#[tokio::test]
async fn relative_workspace_root_still_launches() {
    let ws = tempfile::Builder::new().prefix("ws").tempdir_in(".").unwrap();
    assert!(ws.path().is_relative());
    std::fs::create_dir_all(ws.path().join("backend")).unwrap();
    std::fs::write(
        ws.path().join("backend").join("server.py"),
        "echo booted\nexec sleep 30\n",
    )
    .unwrap();

    let logs = Arc::new(LogManager::new());
    let manager = manager(ws.path(), logs.clone());
    let outcome = manager.start_server(None).await.unwrap();
    let StartOutcome::Started { entry_point, .. } = &outcome else {
        panic!("expected a fresh start, got {outcome:?}");
    };
    assert!(entry_point.is_absolute());

    let booted = wait_for(|| {
        logs.entries()
            .iter()
            .any(|e| e.source == LogSource::Stdout && e.line == "booted")
    })
    .await;
    let running = manager.is_running().await;
    manager.stop_server().await;

    assert!(booted, "backend did not start: {:?}", logs.entries());
    assert!(running);
}
