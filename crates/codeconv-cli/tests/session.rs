//! Session commands against a backend that is not running.

use std::fs;
use std::net::TcpListener;
use std::path::Path;

use codeconv_cli::session::{LogsAction, parse};
use codeconv_cli::{CliConfig, CliContext, Session, SessionCommand, bootstrap};
use codeconv_core::{PanelKind, RunStatus, Settings};
use tempfile::tempdir;

/// An endpoint nothing listens on.
fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

fn context(workspace: &Path) -> CliContext {
    let mut settings = Settings::with_defaults(workspace);
    settings.api_endpoint = dead_endpoint();
    bootstrap(CliConfig { settings }).unwrap()
}

fn project(root: &Path) {
    fs::write(root.join("Order.java"), "class Order {}").unwrap();
    fs::write(root.join("order_dao.py"), "pass").unwrap();
    fs::create_dir_all(root.join("node_modules").join("lib")).unwrap();
    fs::write(root.join("node_modules").join("lib").join("index.js"), "").unwrap();
}

#[tokio::test]
async fn set_project_counts_files_and_suggests_output() {
    let temp = tempdir().unwrap();
    project(temp.path());
    let mut session = Session::new(context(temp.path()));
    session.render_refreshed().await;

    let line = format!("set project {}", temp.path().display());
    session.dispatch(parse(&line).unwrap()).await.unwrap();

    assert_eq!(session.vo_panel().file_count(), 2);
    assert_eq!(
        session.vo_panel().output_path(),
        Some(temp.path().join("generated").as_path())
    );
    assert_eq!(
        session.context().settings.project_path.as_deref(),
        Some(temp.path())
    );
    assert!(session.render_refreshed().await.contains(&PanelKind::VoGenerator));
    session.shutdown().await;
}

#[tokio::test]
async fn make_vo_with_backend_down_records_the_error() {
    let temp = tempdir().unwrap();
    project(temp.path());
    let mut session = Session::new(context(temp.path()));

    let err = session.dispatch(SessionCommand::MakeVo).await.unwrap_err();
    assert_eq!(err.to_string(), "Please set project path first");
    assert_eq!(session.vo_panel().status(), RunStatus::Idle);

    let line = format!("set project {}", temp.path().display());
    session.dispatch(parse(&line).unwrap()).await.unwrap();
    let err = session.dispatch(SessionCommand::MakeVo).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "LLM API is not available. Please check if the server is running."
    );
    assert_eq!(session.vo_panel().status(), RunStatus::Error);
    assert!(!temp.path().join("generated").exists());
    session.shutdown().await;
}

#[tokio::test]
async fn blank_selection_fails_before_the_health_check() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("Dao.java");
    fs::write(&file, "\n\nclass Dao {}\n").unwrap();
    let mut session = Session::new(context(temp.path()));

    let line = format!("convert {} 1 2", file.display());
    let err = session.dispatch(parse(&line).unwrap()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please select the code you want to convert Map to VO"
    );
    assert!(session.converter_panel().history().is_empty());

    let line = format!("convert {} 3 3", file.display());
    let err = session.dispatch(parse(&line).unwrap()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "LLM API is not available. Please check if the server is running."
    );
    session.shutdown().await;
}

#[tokio::test]
async fn follow_and_mute_toggle_live_output() {
    let temp = tempdir().unwrap();
    let mut session = Session::new(context(temp.path()));
    assert!(session.is_following());

    session.dispatch(SessionCommand::Logs(LogsAction::Mute)).await.unwrap();
    assert!(!session.is_following());
    session.dispatch(parse("logs follow").unwrap()).await.unwrap();
    assert!(session.is_following());
    session.shutdown().await;
}
