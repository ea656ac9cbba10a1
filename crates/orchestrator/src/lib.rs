//! Sequential job orchestrator for remote code generation.
//!
//! Drives each test id in a batch through detail lookup, generation
//! trigger, and bounded status polling against the ATM service, writing
//! a per-run log artifact and relaying progress to the control plane
//! through a best-effort [`ProgressSink`].

pub mod batch;
pub mod logfile;
pub mod sink;

pub use batch::{Orchestrator, OrchestratorError};
pub use logfile::RunLog;
pub use sink::{NullSink, ProgressSink};
