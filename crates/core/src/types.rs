//! Job, result, and log-entry types shared across the workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Remote status values
// ---------------------------------------------------------------------------

/// Remote status value indicating a finished, successful generation.
pub const STATUS_SUCCESS: &str = "success";
/// Remote status value indicating a finished, failed generation.
pub const STATUS_FAILED: &str = "failed";

/// Timestamp format used in log entries and the run log artifact.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp the way log entries expect it.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Test type
// ---------------------------------------------------------------------------

/// Kind of test a job targets. Determines the code-generation parameters
/// sent to the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestType {
    Web,
    Mobile,
}

impl TestType {
    /// Parse the remote service's `test_type` string.
    ///
    /// Returns `None` for anything outside `{web, mobile}`; such jobs
    /// are unsupported and must fail without a generation call.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "web" => Some(Self::Web),
            "mobile" => Some(Self::Mobile),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
        }
    }
}

// ---------------------------------------------------------------------------
// Job outcome
// ---------------------------------------------------------------------------

/// Terminal outcome of one job. Poll-budget exhaustion is reported as
/// `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Success,
    Failed,
}

/// Terminal outcome of one job, paired with its identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub test_id: String,
    pub status: JobStatus,
}

/// Outcome of one whole orchestrator run, returned to the launch caller.
///
/// `results` has one entry per input test id, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub results: Vec<TestResult>,
    pub log_file: String,
}

// ---------------------------------------------------------------------------
// Log entries
// ---------------------------------------------------------------------------

/// One line of orchestrator progress, as stored by the control plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    pub timestamp: String,
}

impl LogEntry {
    /// Build an entry timestamped with the current UTC time.
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: format_timestamp(Utc::now()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
