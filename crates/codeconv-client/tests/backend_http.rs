//! Client behavior against an in-process HTTP backend.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use codeconv_client::{ApiClient, ApiClientConfig};
use codeconv_core::{ConversionRequest, ConverterApiPort, MakeVoRequest};
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr) -> ApiClient {
    let config = ApiClientConfig::new(&format!("http://{addr}/"))
        .unwrap()
        .with_health_timeout(Duration::from_millis(300))
        .with_request_timeout(Some(Duration::from_secs(5)));
    ApiClient::new(config).unwrap()
}

async fn echo_convert(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "converted_code": format!("// converted\n{}", body["source_code"].as_str().unwrap_or_default()),
        "source_language": "java",
        "target_language": body["target_language"],
        "file_path": body["file_path"],
        "start_line": body["start_line"],
        "end_line": body["end_line"],
        "processing_time": 0.42,
        "success": true,
        "message": "Conversion completed",
    }))
}

async fn make_vo(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "vo_code": "class X {}",
        "file_count": 3,
        "processing_time": 1.23,
        "success": true,
        "message": format!("scanned {}", body["project_path"].as_str().unwrap_or_default()),
    }))
}

fn healthy_backend() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/convert-code", post(echo_convert))
        .route("/make-vo", post(make_vo))
}

fn failing_backend() -> Router {
    Router::new()
        .route("/health", get(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/convert-code",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "model crashed"})),
                )
            }),
        )
        .route("/make-vo", post(|| async { "this is not json" }))
}

#[tokio::test]
async fn health_is_true_only_for_200() {
    let ok = serve(healthy_backend()).await;
    assert!(client(ok).check_health().await);

    let no_content = serve(failing_backend()).await;
    assert!(!client(no_content).check_health().await);
}

#[tokio::test]
async fn slow_health_counts_as_offline() {
    let addr = serve(Router::new().route(
        "/health",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            "late"
        }),
    ))
    .await;

    assert!(!client(addr).check_health().await);
}

#[tokio::test]
async fn unreachable_backend_is_offline_and_errors() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let client = client(addr);

    assert!(!client.check_health().await);
    let err = client
        .convert_code(&ConversionRequest::new("int a;", "#"))
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("API request failed:"));
}

#[tokio::test]
async fn convert_returns_body_verbatim() {
    let addr = serve(healthy_backend()).await;
    let request = ConversionRequest::new("Map m;", "#")
        .with_range(1, 1)
        .with_file_path("/src/A.java");

    let response = client(addr).convert_code(&request).await.unwrap();
    assert!(response.success);
    assert_eq!(response.converted_code, "// converted\nMap m;");
    assert_eq!(response.target_language, "#");
    assert_eq!(response.start_line, Some(1));
    assert_eq!(response.file_path.as_deref(), Some("/src/A.java"));
    assert!((response.processing_time - 0.42).abs() < f64::EPSILON);
}

#[tokio::test]
async fn make_vo_returns_body_verbatim() {
    let addr = serve(healthy_backend()).await;
    let request = MakeVoRequest::new("/work/shop", Some("/work/shop/generated".to_string()));

    let response = client(addr).make_vo(&request).await.unwrap();
    assert_eq!(response.vo_code, "class X {}");
    assert_eq!(response.file_count, 3);
    assert_eq!(response.message, "scanned /work/shop");
}

#[tokio::test]
async fn server_error_and_malformed_json_are_errors() {
    let addr = serve(failing_backend()).await;
    let client = client(addr);

    let err = client
        .convert_code(&ConversionRequest::new("int a;", "#"))
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("API request failed:"), "{message}");
    assert!(message.contains("500"), "{message}");
    assert!(message.contains("model crashed"), "{message}");

    let err = client
        .make_vo(&MakeVoRequest::new("/work/shop", None))
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Make VO API request failed:"), "{message}");
    assert!(message.contains("Invalid response body"), "{message}");
}

#[tokio::test]
async fn request_timeout_is_reported() {
    let addr = serve(Router::new().route(
        "/convert-code",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            "late"
        }),
    ))
    .await;
    let config = ApiClientConfig::new(&format!("http://{addr}"))
        .unwrap()
        .with_request_timeout(Some(Duration::from_millis(200)));
    let client = ApiClient::new(config).unwrap();

    let err = client
        .convert_code(&ConversionRequest::new("int a;", "#"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "API request failed: Request timed out after 200ms"
    );
}
