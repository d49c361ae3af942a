//! Rate source trait definitions.
//!
//! This module defines the `RateSource` trait: the outbound data fetch the
//! rate pipeline depends on.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::SeriesQuery;

use super::capabilities::RateLimit;

/// Outbound fetch of one SDMX series.
///
/// Implementations return the raw response body. They signal absence of the
/// series with [`MarketDataError::SeriesNotFound`]; every other failure is
/// opaque to callers. Calls are idempotent and safe to retry.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use eurofx_market_data::provider::{RateLimit, RateSource};
///
/// struct FixtureSource(String);
///
/// #[async_trait]
/// impl RateSource for FixtureSource {
///     fn id(&self) -> &'static str {
///         "FIXTURE"
///     }
///
///     async fn fetch(&self, _query: &SeriesQuery) -> Result<String, MarketDataError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Unique identifier for this source.
    ///
    /// Used for logging, circuit breaker tracking, and rate limiting.
    fn id(&self) -> &'static str;

    /// Rate limiting configuration for this source.
    fn rate_limit(&self) -> RateLimit {
        RateLimit::default()
    }

    /// Fetch the raw body for `query`.
    async fn fetch(&self, query: &SeriesQuery) -> Result<String, MarketDataError>;
}
