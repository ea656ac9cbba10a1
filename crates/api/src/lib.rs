//! Control-plane HTTP service for code-generation automation runs.
//!
//! Exposes the launch endpoint that drives an orchestrator run to
//! completion, the log/status push endpoints fed by running
//! orchestrators, a per-job live status stream (SSE), and log artifact
//! downloads.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
pub mod store;
