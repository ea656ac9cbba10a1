//! Integration tests for the automation launch endpoint, driven against
//! a stub ATM service on a loopback listener.

mod common;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use common::{body_json, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Stub ATM service
// ---------------------------------------------------------------------------

/// Scripted remote service: maps test ids to test types and counts
/// generation triggers. Unknown test ids fail detail lookup with a 500.
#[derive(Default)]
struct StubAtm {
    test_types: Mutex<HashMap<String, String>>,
    code_calls: AtomicUsize,
}

impl StubAtm {
    fn with_test(self: Arc<Self>, test_id: &str, test_type: &str) -> Arc<Self> {
        self.test_types
            .lock()
            .unwrap()
            .insert(test_id.to_string(), test_type.to_string());
        self
    }
}

async fn stub_details(
    State(stub): State<Arc<StubAtm>>,
    Path(test_id): Path<String>,
) -> axum::response::Response {
    match stub.test_types.lock().unwrap().get(&test_id) {
        Some(test_type) => Json(json!({ "test_type": test_type })).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn stub_code(
    State(stub): State<Arc<StubAtm>>,
    Path(_test_id): Path<String>,
) -> Json<serde_json::Value> {
    stub.code_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({}))
}

async fn stub_codes(Path(_test_id): Path<String>) -> Json<serde_json::Value> {
    // Every generation attempt reports success on the first poll.
    Json(json!({ "data": [{ "status": "success" }] }))
}

/// Serve the stub on an ephemeral loopback port; returns its base URL.
async fn spawn_stub(stub: Arc<StubAtm>) -> String {
    let app = Router::new()
        .route("/test-details/{test_id}", get(stub_details))
        .route("/test/{test_id}/code", post(stub_code))
        .route("/test/{test_id}/codes", get(stub_codes))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn launch_without_auth_token_is_rejected() {
    let t = common::build_test_app();

    let response = post_json(
        t.app,
        "/api/v1/automation/run",
        json!({ "test_ids": ["J1"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"], "Both auth_token and test_ids are required");
}

#[tokio::test]
async fn launch_with_empty_test_ids_is_rejected() {
    let t = common::build_test_app();

    let response = post_json(
        t.app,
        "/api/v1/automation/run",
        json!({ "auth_token": "tok", "test_ids": [] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn rejected_launch_leaves_stores_untouched() {
    let t = common::build_test_app();

    let response = post_json(t.app, "/api/v1/automation/run", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(t.store.logs().is_empty());
}

// ---------------------------------------------------------------------------
// Full launch scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn successful_run_returns_results_and_log_file() {
    let stub = Arc::new(StubAtm::default()).with_test("J1", "web");
    let base_url = spawn_stub(Arc::clone(&stub)).await;
    let t = common::build_test_app_with_atm(&base_url);

    let response = post_json(
        t.app,
        "/api/v1/automation/run",
        json!({ "auth_token": "tok", "test_ids": ["J1"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["results"][0]["test_id"], "J1");
    assert_eq!(body["results"][0]["status"], "success");

    // The log artifact exists under the configured log dir and is
    // downloadable by the name the run returned.
    let log_file = body["log_file"].as_str().unwrap();
    assert!(log_file.starts_with("code_gen_logs_"));
    assert!(t.log_dir.path().join(log_file).exists());

    // The in-process relay fed the live stores.
    assert_eq!(t.store.status_of("J1").as_deref(), Some("success"));
    assert!(t
        .store
        .logs()
        .iter()
        .any(|e| e.message == "Starting processing for test ID: J1"));

    assert_eq!(stub.code_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unsupported_test_type_fails_without_generation_call() {
    let stub = Arc::new(StubAtm::default()).with_test("J1", "desktop");
    let base_url = spawn_stub(Arc::clone(&stub)).await;
    let t = common::build_test_app_with_atm(&base_url);

    let response = post_json(
        t.app,
        "/api/v1/automation/run",
        json!({ "auth_token": "tok", "test_ids": ["J1"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["results"][0]["status"], "failed");
    assert_eq!(stub.code_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn detail_lookup_failure_fails_job_but_not_batch() {
    // J2 is unknown to the stub, so its detail lookup returns 500; J1
    // still completes. Results preserve input order.
    let stub = Arc::new(StubAtm::default()).with_test("J1", "web");
    let base_url = spawn_stub(Arc::clone(&stub)).await;
    let t = common::build_test_app_with_atm(&base_url);

    let response = post_json(
        t.app,
        "/api/v1/automation/run",
        json!({ "auth_token": "tok", "test_ids": ["J2", "J1"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["test_id"], "J2");
    assert_eq!(results[0]["status"], "failed");
    assert_eq!(results[1]["test_id"], "J1");
    assert_eq!(results[1]["status"], "success");

    // J2 never reached the generation step.
    assert_eq!(stub.code_calls.load(Ordering::SeqCst), 1);
    assert_matches!(t.store.status_of("J2"), None);
}
