//! Route registration for the API.

pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{automation, logs, status};
use crate::state::AppState;

/// All routes nested under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/automation/run", post(automation::run_automation))
        .route("/logs", get(logs::get_logs))
        .route("/logs/update", post(logs::update_logs))
        .route("/logs/download", get(logs::download_log))
        .route("/status/update", post(status::update_status))
        .route("/status/{test_id}/stream", get(status::stream_status))
}
