//! Resilience decorator for any [`RateSource`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};

use super::{CircuitBreaker, RateLimiter, ResilienceConfig};
use crate::errors::MarketDataError;
use crate::models::SeriesQuery;
use crate::provider::{RateLimit, RateSource};

/// Wraps a source with rate limiting, circuit breaking, a per-attempt time
/// limit and retry.
///
/// Callers see the same failure kinds as from the bare source, plus
/// [`MarketDataError::CircuitOpen`] while the source is blocked.
pub struct ResilientSource<S> {
    inner: S,
    config: ResilienceConfig,
    circuit_breaker: Arc<CircuitBreaker>,
    rate_limiter: Arc<RateLimiter>,
}

impl<S: RateSource> ResilientSource<S> {
    pub fn new(inner: S, config: ResilienceConfig) -> Self {
        let circuit_breaker = Arc::new(CircuitBreaker::with_config(config.circuit_breaker.clone()));
        let rate_limiter = Arc::new(RateLimiter::new());
        rate_limiter.configure(inner.id(), inner.rate_limit());

        Self {
            inner,
            config,
            circuit_breaker,
            rate_limiter,
        }
    }

    pub fn circuit_breaker(&self) -> &CircuitBreaker {
        &self.circuit_breaker
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn attempt(&self, query: &SeriesQuery) -> Result<String, MarketDataError> {
        let id = self.inner.id();

        if !self.circuit_breaker.is_allowed(id) {
            return Err(MarketDataError::CircuitOpen {
                provider: id.to_string(),
            });
        }

        self.rate_limiter.acquire(id).await;

        let result = match tokio::time::timeout(self.config.time_limit, self.inner.fetch(query))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(MarketDataError::Timeout {
                provider: id.to_string(),
            }),
        };

        match &result {
            Err(e) if e.counts_as_circuit_failure() => self.circuit_breaker.record_failure(id),
            _ => self.circuit_breaker.record_success(id),
        }

        result
    }
}

#[async_trait]
impl<S: RateSource> RateSource for ResilientSource<S> {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    fn rate_limit(&self) -> RateLimit {
        self.inner.rate_limit()
    }

    async fn fetch(&self, query: &SeriesQuery) -> Result<String, MarketDataError> {
        let mut attempt = 1;
        loop {
            match self.attempt(query).await {
                Ok(body) => {
                    debug!("{} answered {} on attempt {}", self.id(), query.key, attempt);
                    return Ok(body);
                }
                Err(e) if self.config.retry.should_retry(&e, attempt) => {
                    warn!(
                        "{} attempt {}/{} for {} failed: {}. Retrying in {:?}",
                        self.id(),
                        attempt,
                        self.config.retry.max_attempts,
                        query.key,
                        e,
                        self.config.retry.wait
                    );
                    if self.config.retry.wait > Duration::ZERO {
                        tokio::time::sleep(self.config.retry.wait).await;
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
