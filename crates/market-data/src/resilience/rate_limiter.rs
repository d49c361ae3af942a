//! Token bucket rate limiter for rate sources.
//!
//! Each source gets its own bucket. Capacity bounds the burst, and tokens
//! refill continuously at `requests_per_minute / 60` per second.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::provider::RateLimit;

/// Token bucket for a single source.
#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
    /// Tokens per second.
    rate: f64,
    capacity: f64,
}

impl TokenBucket {
    fn from_limit(limit: &RateLimit) -> Self {
        let capacity = limit.burst_capacity.max(1.0);
        Self {
            tokens: capacity,
            last_update: Instant::now(),
            rate: f64::from(limit.requests_per_minute.max(1)) / 60.0,
            capacity,
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.last_update = now;
    }

    fn try_acquire(&mut self) -> bool {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn time_until_available(&mut self) -> Duration {
        self.refill();

        if self.tokens >= 1.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64((1.0 - self.tokens) / self.rate)
        }
    }
}

/// Thread-safe token bucket rate limiter keyed by source id.
///
/// Buckets are created on first use from the limit registered with
/// [`configure`](Self::configure), or from [`RateLimit::default`].
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, TokenBucket>>,
    limits: Mutex<HashMap<String, RateLimit>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            limits: Mutex::new(HashMap::new()),
        }
    }

    fn lock_buckets(&self) -> MutexGuard<'_, HashMap<String, TokenBucket>> {
        self.buckets.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter buckets mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn lock_limits(&self) -> MutexGuard<'_, HashMap<String, RateLimit>> {
        self.limits.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter limits mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Register the limit for `source`, replacing any existing bucket.
    pub fn configure(&self, source: &str, limit: RateLimit) {
        self.lock_limits().insert(source.to_string(), limit);
        // limits lock released above; never hold both
        self.lock_buckets().remove(source);
    }

    /// Wait until a token for `source` is available, then take it.
    pub async fn acquire(&self, source: &str) {
        loop {
            let wait_time = {
                let mut buckets = self.lock_buckets();
                let bucket = buckets
                    .entry(source.to_string())
                    .or_insert_with(|| self.create_bucket(source));

                if bucket.try_acquire() {
                    debug!("Rate limiter: acquired token for '{}'", source);
                    return;
                }

                bucket.time_until_available()
            };

            if wait_time > Duration::ZERO {
                debug!(
                    "Rate limiter: waiting {:?} for source '{}'",
                    wait_time, source
                );
                tokio::time::sleep(wait_time).await;
            }
        }
    }

    /// Take a token without waiting. Returns false when rate limited.
    pub fn try_acquire(&self, source: &str) -> bool {
        let mut buckets = self.lock_buckets();
        buckets
            .entry(source.to_string())
            .or_insert_with(|| self.create_bucket(source))
            .try_acquire()
    }

    fn create_bucket(&self, source: &str) -> TokenBucket {
        let limits = self.lock_limits();
        match limits.get(source) {
            Some(limit) => TokenBucket::from_limit(limit),
            None => TokenBucket::from_limit(&RateLimit::default()),
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
