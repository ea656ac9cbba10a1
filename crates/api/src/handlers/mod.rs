//! HTTP handlers, grouped by concern.

pub mod automation;
pub mod logs;
pub mod status;
