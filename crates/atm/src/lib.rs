//! HTTP client for the remote automated-test-management (ATM) service.
//!
//! The ATM service owns the actual code-generation work. This crate
//! wraps the three calls the orchestrator needs (test-detail lookup,
//! generation trigger, and status polling) behind the [`AtmApi`] trait
//! so the orchestrator can be driven against a mock in tests.

pub mod client;
pub mod types;

pub use client::{AtmApi, AtmClient, AtmError};
pub use types::{CodeEntry, CodeListResponse, CodegenParams, TestDetails};
