//! Bounded retry policy and clock abstraction for the polling loop.
//!
//! The orchestrator polls the remote service until a terminal status or
//! until the attempt budget runs out. Both the budget and the inter-poll
//! delay live in [`RetryPolicy`]; the delay itself goes through the
//! [`Clock`] trait so tests can run the loop without real sleeps.

use std::time::Duration;

use async_trait::async_trait;

/// Maximum number of status polls before a job is forced to `failed`.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 60;
/// Fixed delay between status polls (60 x 15s = 15 minutes max wait).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Bounded retry policy for status polling.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Hard cap on poll attempts per job.
    pub max_attempts: u32,
    /// Delay after each non-terminal poll.
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Sleep abstraction injected into the orchestrator.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by `tokio::time::sleep`.
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_documented_budget() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 60);
        assert_eq!(policy.interval, Duration::from_secs(15));
    }

    #[tokio::test]
    async fn tokio_clock_sleeps() {
        tokio::time::pause();
        let clock = TokioClock;
        let before = tokio::time::Instant::now();
        clock.sleep(Duration::from_secs(15)).await;
        assert!(before.elapsed() >= Duration::from_secs(15));
    }
}
