use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::RunStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// In-memory live status map and log stream, constructed at service
    /// start and torn down at shutdown.
    pub store: Arc<RunStore>,
}
