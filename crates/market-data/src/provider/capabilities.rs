//! Provider rate limiting configuration.

use std::time::Duration;

/// Rate limiting configuration for a provider.
///
/// Controls how aggressively we can call a provider to avoid
/// hitting their rate limits and getting blocked.
#[derive(Clone, Debug, PartialEq)]
pub struct RateLimit {
    /// Maximum requests allowed per minute.
    pub requests_per_minute: u32,

    /// Requests that may be issued back to back before throttling starts.
    pub burst_capacity: f64,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            burst_capacity: 10.0,
        }
    }
}

/// Default HTTP request timeout used by HTTP-backed sources.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
