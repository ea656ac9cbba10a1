//! Best-effort progress relay from a running orchestrator.
//!
//! The orchestrator pushes every log line and every observed poll status
//! through a [`ProgressSink`]. Delivery is at-most-once with no
//! guarantee: implementations must not block and must not fail; a lost
//! update never aborts job processing.

use codegen_core::types::LogEntry;

/// Non-blocking notification channel to the control plane's live stores.
pub trait ProgressSink: Send + Sync {
    /// Relay one log entry.
    fn log(&self, entry: LogEntry);

    /// Relay the latest observed status for a test id.
    /// Last write wins on the receiving side.
    fn status(&self, test_id: &str, status: &str);
}

/// Sink that discards everything. Used when running an orchestrator
/// without a control plane attached.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn log(&self, _entry: LogEntry) {}

    fn status(&self, _test_id: &str, _status: &str) {}
}
