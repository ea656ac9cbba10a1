//! Log push, retrieval, and artifact download.
//!
//! Routes:
//! - `POST /logs/update`   -- append one entry to the live log stream
//! - `GET  /logs`          -- all stored entries so far
//! - `GET  /logs/download` -- download a run log artifact by file name

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use codegen_core::error::CoreError;
use codegen_core::types::{format_timestamp, LogEntry};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /logs/update`.
#[derive(Debug, Deserialize)]
pub struct UpdateLogsRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// POST /api/v1/logs/update
///
/// Missing `message` is rejected before any mutation. A missing
/// timestamp is filled in server-side.
pub async fn update_logs(
    State(state): State<AppState>,
    Json(input): Json<UpdateLogsRequest>,
) -> AppResult<impl IntoResponse> {
    let message = input
        .message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("Missing message".to_string())))?;

    let timestamp = input
        .timestamp
        .unwrap_or_else(|| format_timestamp(Utc::now()));

    state.store.append_log(LogEntry { message, timestamp });

    Ok(Json(json!({ "success": true })))
}

/// GET /api/v1/logs
pub async fn get_logs(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "logs": state.store.logs() }))
}

/// Query parameters for `GET /logs/download`.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub file: Option<String>,
}

/// GET /api/v1/logs/download?file=NAME
///
/// Serves a run log artifact as an attachment. Only bare file names
/// inside the configured log directory are allowed; anything else is
/// reported as not found.
pub async fn download_log(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> AppResult<Response> {
    let name = query
        .file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("Missing file parameter".to_string())))?;

    // Reject anything that could escape the log directory.
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        tracing::warn!(file = %name, "Rejected log download with path components");
        return Err(not_found(&name));
    }

    let path = state.config.log_dir.join(&name);
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        tracing::warn!(file = %name, error = %e, "Log file not found");
        not_found(&name)
    })?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{name}\""),
        ),
    ];

    Ok((headers, bytes).into_response())
}

fn not_found(name: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Log file",
        name: name.to_string(),
    })
}
