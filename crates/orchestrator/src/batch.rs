//! Per-job state machine and sequential batch driver.
//!
//! Each job moves through detail lookup → generation trigger → status
//! polling. Remote failures never propagate: they resolve the job to
//! `failed` with a log line, and the batch moves on to the next id.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use codegen_atm::AtmApi;
use codegen_core::retry::{Clock, RetryPolicy};
use codegen_core::types::{
    JobStatus, LogEntry, RunResult, TestResult, TestType, STATUS_FAILED, STATUS_SUCCESS,
};
use uuid::Uuid;

use crate::logfile::RunLog;
use crate::sink::ProgressSink;

/// Structural failures while setting up a run.
///
/// Distinct from remote-call failures, which resolve individual jobs to
/// `failed` instead of surfacing here.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// The run log artifact could not be created.
    #[error("Failed to create run log: {0}")]
    LogFile(#[from] std::io::Error),
}

/// One orchestrator run: a batch of test ids processed strictly in
/// order, one job fully resolved before the next begins.
pub struct Orchestrator<A: AtmApi, C: Clock> {
    run_id: Uuid,
    client: A,
    clock: C,
    sink: Arc<dyn ProgressSink>,
    policy: RetryPolicy,
    log: RunLog,
}

impl<A: AtmApi, C: Clock> Orchestrator<A, C> {
    /// Set up a run: allocate a run id and create the log artifact.
    ///
    /// This is the only fallible step; everything after construction
    /// resolves to per-job terminal statuses.
    pub fn new(
        client: A,
        clock: C,
        sink: Arc<dyn ProgressSink>,
        policy: RetryPolicy,
        log_dir: &Path,
    ) -> Result<Self, OrchestratorError> {
        let log = RunLog::create(log_dir, Utc::now())?;
        Ok(Self {
            run_id: Uuid::new_v4(),
            client,
            clock,
            sink,
            policy,
            log,
        })
    }

    /// Identifier of this run, for log correlation.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Process every test id in input order and return one result per
    /// id, plus the name of the run's log artifact.
    pub async fn process_batch(mut self, test_ids: Vec<String>) -> RunResult {
        let mut results = Vec::with_capacity(test_ids.len());

        for test_id in test_ids {
            self.log_message(&format!("Processing test ID: {test_id}"));
            let status = self.process_job(&test_id).await;
            match status {
                JobStatus::Success => {
                    self.log_message(&format!(
                        "Successfully completed processing for {test_id}"
                    ));
                }
                JobStatus::Failed => {
                    self.log_message(&format!("Failed to process test ID: {test_id}"));
                }
            }
            self.log_message("Moving to next test ID...");
            results.push(TestResult { test_id, status });
        }

        RunResult {
            results,
            log_file: self.log.file_name().to_string(),
        }
    }

    /// Drive a single job to a terminal status.
    async fn process_job(&mut self, test_id: &str) -> JobStatus {
        self.log_message(&format!("Starting processing for test ID: {test_id}"));

        // Step 1: detail lookup. Unknown or unsupported types fail the
        // job without consuming a generation call.
        let test_type = match self.lookup_test_type(test_id).await {
            Some(t) => t,
            None => return JobStatus::Failed,
        };

        // Step 2: trigger generation.
        if !self.trigger_generation(test_id, test_type).await {
            return JobStatus::Failed;
        }

        // Step 3: poll until terminal or the attempt budget runs out.
        self.poll_until_terminal(test_id).await
    }

    /// Detail lookup. Returns `None` (job failed) on request failure,
    /// missing type, or a type outside `{web, mobile}`.
    async fn lookup_test_type(&mut self, test_id: &str) -> Option<TestType> {
        let details = match self.client.test_details(test_id).await {
            Ok(details) => details,
            Err(e) => {
                self.log_message(&format!("Error getting test details for {test_id}: {e}"));
                return None;
            }
        };

        let raw = match details.test_type {
            Some(raw) => raw,
            None => {
                self.log_message(&format!("Test type for {test_id}: none"));
                return None;
            }
        };

        self.log_message(&format!("Test type for {test_id}: {raw}"));

        match TestType::parse(&raw) {
            Some(t) => Some(t),
            None => {
                self.log_message(&format!("Unsupported test type for {test_id}: {raw}"));
                None
            }
        }
    }

    /// Trigger generation. Returns `false` (job failed) on request failure.
    async fn trigger_generation(&mut self, test_id: &str, test_type: TestType) -> bool {
        self.log_message(&format!("Starting code generation for {test_id}..."));

        match self.client.request_code_generation(test_id, test_type).await {
            Ok(()) => {
                self.log_message(&format!("Code generation started for {test_id}"));
                true
            }
            Err(e) => {
                self.log_message(&format!("Error getting test code for {test_id}: {e}"));
                false
            }
        }
    }

    /// Poll the generation status up to `policy.max_attempts` times.
    ///
    /// Undecodable or missing statuses and failed poll requests count as
    /// pending. Every non-terminal poll is followed by one fixed-interval
    /// sleep. Budget exhaustion forces `failed`.
    async fn poll_until_terminal(&mut self, test_id: &str) -> JobStatus {
        self.log_message(&format!("Waiting for test completion for {test_id}..."));

        for _ in 0..self.policy.max_attempts {
            match self.client.latest_code_status(test_id).await {
                Ok(Some(status)) => {
                    self.log_message(&format!(
                        "Current codegen status for {test_id}: {status}"
                    ));
                    self.sink.status(test_id, &status);

                    match status.as_str() {
                        STATUS_SUCCESS => {
                            self.log_message(&format!(
                                "Code generation completed successfully for {test_id}"
                            ));
                            return JobStatus::Success;
                        }
                        STATUS_FAILED => {
                            self.log_message(&format!(
                                "Code generation failed for {test_id}"
                            ));
                            return JobStatus::Failed;
                        }
                        _ => {}
                    }
                }
                Ok(None) => {
                    self.log_message(&format!("Current codegen status for {test_id}: pending"));
                }
                Err(e) => {
                    self.log_message(&format!("Error checking test status for {test_id}: {e}"));
                }
            }

            self.clock.sleep(self.policy.interval).await;
        }

        self.log_message(&format!("Maximum wait time exceeded for {test_id}"));
        JobStatus::Failed
    }

    /// Append a timestamped line to the run log, emit a tracing line,
    /// and best-effort relay the entry to the control plane.
    fn log_message(&mut self, message: &str) {
        let entry = LogEntry::now(message);
        self.log
            .append(&format!("[{}] {}", entry.timestamp, entry.message));
        tracing::info!(run_id = %self.run_id, "{message}");
        self.sink.log(entry);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
