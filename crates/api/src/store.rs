//! Process-scoped live stores for status and log updates.
//!
//! [`RunStore`] holds the last-known status per test id and the
//! append-only log stream, shared by every running orchestrator and
//! every subscriber. A single mutex guards both; writes from concurrent
//! runs may interleave, with last write winning per test id. State lives
//! for the life of the process only.

use std::collections::HashMap;
use std::sync::Mutex;

use codegen_core::types::LogEntry;
use codegen_orchestrator::ProgressSink;

#[derive(Default)]
struct StoreInner {
    statuses: HashMap<String, String>,
    logs: Vec<LogEntry>,
}

/// In-memory status map and log stream.
#[derive(Default)]
pub struct RunStore {
    inner: Mutex<StoreInner>,
}

impl RunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one log entry.
    pub fn append_log(&self, entry: LogEntry) {
        self.lock().logs.push(entry);
    }

    /// Snapshot of all log entries stored so far, in append order.
    pub fn logs(&self) -> Vec<LogEntry> {
        self.lock().logs.clone()
    }

    /// Overwrite the last-known status for a test id (last write wins).
    /// Entries are never deleted for the life of the process.
    pub fn set_status(&self, test_id: &str, status: &str) {
        self.lock()
            .statuses
            .insert(test_id.to_string(), status.to_string());
    }

    /// Last-known status for a test id, or `None` if no status has been
    /// observed yet.
    pub fn status_of(&self, test_id: &str) -> Option<String> {
        self.lock().statuses.get(test_id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().expect("run store mutex poisoned")
    }
}

/// In-process orchestrator runs relay progress straight into the store.
impl ProgressSink for RunStore {
    fn log(&self, entry: LogEntry) {
        self.append_log(entry);
    }

    fn status(&self, test_id: &str, status: &str) {
        self.set_status(test_id, status);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
