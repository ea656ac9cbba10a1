//! Shared domain types for the code-generation orchestration service.
//!
//! This crate is the leaf of the workspace: it defines the job/result
//! vocabulary, the error taxonomy, and the bounded retry policy used by
//! the orchestrator's polling loop. It has no HTTP or runtime wiring.

pub mod error;
pub mod retry;
pub mod types;
