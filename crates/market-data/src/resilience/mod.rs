//! Resilience layer around rate sources.
//!
//! This module provides:
//! - Token bucket rate limiting per source
//! - Count-based circuit breaking
//! - Fixed-wait retry for transient failures
//! - A per-attempt time limit
//!
//! [`ResilientSource`] combines all four as a [`RateSource`](crate::provider::RateSource)
//! decorator, so callers keep seeing the plain not-found / other-failure split.

mod circuit_breaker;
mod rate_limiter;
mod resilient_source;
mod retry;

use std::time::Duration;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use rate_limiter::RateLimiter;
pub use resilient_source::ResilientSource;
pub use retry::RetryPolicy;

/// Default upper bound for a single attempt.
const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(4);

/// Settings for [`ResilientSource`].
#[derive(Clone, Debug, PartialEq)]
pub struct ResilienceConfig {
    pub retry: RetryPolicy,
    pub time_limit: Duration,
    pub circuit_breaker: CircuitBreakerConfig,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            time_limit: DEFAULT_TIME_LIMIT,
            circuit_breaker: CircuitBreakerConfig::default(),
        }
    }
}
