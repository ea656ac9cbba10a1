//! Status push and live per-job subscription.
//!
//! Routes:
//! - `POST /status/update`           -- overwrite the last-known status
//! - `GET  /status/{test_id}/stream` -- SSE stream of status snapshots

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::Json;
use futures::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio_stream::wrappers::IntervalStream;

use codegen_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /status/update`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub test_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One SSE payload: the last-known status for the subscribed test id.
#[derive(Debug, Serialize)]
struct StatusSnapshot {
    status: String,
}

/// Interval between status snapshots on the subscription stream.
const STREAM_INTERVAL: Duration = Duration::from_secs(1);

/// POST /api/v1/status/update
///
/// Last write wins; repeated pushes for the same test id overwrite.
pub async fn update_status(
    State(state): State<AppState>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let (test_id, status) = match (input.test_id, input.status) {
        (Some(test_id), Some(status)) if !test_id.is_empty() && !status.is_empty() => {
            (test_id, status)
        }
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Missing test_id or status".to_string(),
            )))
        }
    };

    state.store.set_status(&test_id, &status);
    tracing::info!(%test_id, %status, "Status update");

    Ok(Json(json!({ "success": true })))
}

/// GET /api/v1/status/{test_id}/stream
///
/// Emits the last-known status roughly once per second as long as one
/// has been observed; emits nothing (beyond keep-alive comments) while
/// the test id is unknown. The stream has no server-side termination;
/// it ends when the subscriber disconnects.
pub async fn stream_status(
    State(state): State<AppState>,
    Path(test_id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let store = Arc::clone(&state.store);

    let stream = IntervalStream::new(tokio::time::interval(STREAM_INTERVAL)).filter_map(
        move |_| {
            let snapshot = store.status_of(&test_id).map(|status| {
                Ok::<_, Infallible>(Event::default()
                    .json_data(StatusSnapshot { status })
                    .expect("status snapshot is always serialisable"))
            });
            futures::future::ready(snapshot)
        },
    );

    Sse::new(stream).keep_alive(KeepAlive::default())
}
