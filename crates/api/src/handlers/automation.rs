//! Launch endpoint for automation runs.
//!
//! Routes:
//! - `POST /automation/run` -- launch one orchestrator run and block
//!   until it completes.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use codegen_atm::AtmClient;
use codegen_core::error::CoreError;
use codegen_core::retry::TokioClock;
use codegen_orchestrator::{Orchestrator, ProgressSink};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /automation/run`.
///
/// Both fields are checked by hand so a missing field produces the
/// API's own validation error rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RunAutomationRequest {
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub test_ids: Option<Vec<String>>,
}

/// POST /api/v1/automation/run
///
/// Validates the request, spawns one orchestrator run as a task, and
/// blocks until it completes. There is no caller-side timeout: the
/// response arrives when the whole batch has resolved. Concurrent
/// launches run as independent tasks sharing only the live stores.
pub async fn run_automation(
    State(state): State<AppState>,
    Json(input): Json<RunAutomationRequest>,
) -> AppResult<impl IntoResponse> {
    let auth_token = input
        .auth_token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(missing_parameters)?;
    let test_ids = input
        .test_ids
        .filter(|ids| !ids.is_empty())
        .ok_or_else(missing_parameters)?;

    tracing::info!(test_ids = ?test_ids, "Processing automation request");

    let client = AtmClient::new(state.config.atm_base_url.clone(), auth_token)
        .map_err(|e| AppError::InternalError(format!("Failed to build ATM client: {e}")))?;

    let sink: Arc<dyn ProgressSink> = Arc::clone(&state.store) as Arc<dyn ProgressSink>;

    let orchestrator = Orchestrator::new(
        client,
        TokioClock,
        sink,
        state.config.retry_policy(),
        &state.config.log_dir,
    )
    .map_err(|e| AppError::Orchestration {
        message: "Failed to start automation run".to_string(),
        details: e.to_string(),
    })?;

    let run_id = orchestrator.run_id();
    let handle = tokio::spawn(orchestrator.process_batch(test_ids));

    match handle.await {
        Ok(run) => {
            tracing::info!(%run_id, results = run.results.len(), "Automation run completed");
            Ok(Json(run))
        }
        Err(join_err) => {
            let details = if join_err.is_panic() {
                panic_message(join_err.into_panic())
            } else {
                join_err.to_string()
            };
            Err(AppError::Orchestration {
                message: "Automation run failed".to_string(),
                details,
            })
        }
    }
}

fn missing_parameters() -> AppError {
    AppError::Core(CoreError::Validation(
        "Both auth_token and test_ids are required".to_string(),
    ))
}

/// Extract a readable message from a task panic payload.
fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(s) => *s,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(s) => (*s).to_string(),
            Err(_) => "orchestrator task panicked with a non-string payload".to_string(),
        },
    }
}
