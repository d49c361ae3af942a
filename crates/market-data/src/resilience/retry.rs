//! Retry policy for transient source failures.

use std::time::Duration;

use crate::errors::{MarketDataError, RetryClass};

/// Default number of attempts, including the first.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default fixed wait between attempts.
const DEFAULT_WAIT: Duration = Duration::from_millis(1000);

/// Fixed-wait retry configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. `1` disables retrying.
    pub max_attempts: u32,
    /// Wait between attempts.
    pub wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            wait: DEFAULT_WAIT,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            wait: Duration::ZERO,
        }
    }

    /// Whether `error`, raised on attempt number `attempt` (1-based),
    /// should be followed by another attempt.
    pub fn should_retry(&self, error: &MarketDataError, attempt: u32) -> bool {
        attempt < self.max_attempts && error.retry_class() == RetryClass::WithBackoff
    }
}
