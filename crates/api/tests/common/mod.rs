use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use codegen_api::config::ServerConfig;
use codegen_api::router::build_app_router;
use codegen_api::state::AppState;
use codegen_api::store::RunStore;

/// A built test application plus handles to its collaborators.
///
/// Keeps the temporary log directory alive for the duration of the test
/// and exposes the store so tests can assert on shared state directly.
#[allow(dead_code)]
pub struct TestApp {
    pub app: Router,
    pub store: Arc<RunStore>,
    pub log_dir: TempDir,
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(log_dir: &Path, atm_base_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        atm_base_url: atm_base_url.to_string(),
        log_dir: log_dir.to_path_buf(),
        max_poll_attempts: 60,
        poll_interval_secs: 15,
    }
}

/// Build the full application router against an unreachable ATM service.
///
/// Suitable for every test that does not launch an automation run.
#[allow(dead_code)]
pub fn build_test_app() -> TestApp {
    build_test_app_with_atm("http://127.0.0.1:9/api/atm/v1")
}

/// Build the full application router pointed at a specific ATM base URL
/// (e.g. a loopback stub server).
///
/// This goes through [`build_app_router`] so integration tests exercise
/// the same middleware stack that production uses.
pub fn build_test_app_with_atm(atm_base_url: &str) -> TestApp {
    let log_dir = TempDir::new().expect("failed to create temp log dir");
    let config = test_config(log_dir.path(), atm_base_url);
    let store = Arc::new(RunStore::new());

    let state = AppState {
        config: Arc::new(config.clone()),
        store: Arc::clone(&store),
    };

    TestApp {
        app: build_app_router(state, &config),
        store,
        log_dir,
    }
}

/// Send a GET request to the app and return the raw response.
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and return the raw response.
#[allow(dead_code)]
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read a response body to completion and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not valid JSON")
}
