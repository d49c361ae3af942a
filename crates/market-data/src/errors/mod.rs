//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all upstream rate operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while fetching or decoding upstream rate series.
///
/// Each variant is classified into a [`RetryClass`] via the [`retry_class`](Self::retry_class)
/// method, which determines how the resilience layer should handle the error.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The upstream service reported that no data exists for the series key.
    /// This is a terminal error - retrying won't help.
    #[error("Series not found: {0}")]
    SeriesNotFound(String),

    /// The upstream payload could not be decoded as an SDMX-JSON document.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The provider rate limited the request (HTTP 429).
    /// Should retry with backoff.
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    /// Should retry with backoff.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-success HTTP status, bad body).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The circuit breaker is open for this provider.
    #[error("Circuit open: {provider}")]
    CircuitOpen {
        /// The provider with an open circuit
        provider: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// - [`RetryClass::Never`]: Don't retry, the error is terminal
    /// - [`RetryClass::WithBackoff`]: Retry after the configured wait
    /// - [`RetryClass::CircuitOpen`]: Provider circuit is open, fail fast
    ///
    /// # Examples
    ///
    /// ```
    /// use eurofx_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited { provider: "BUNDESBANK".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = MarketDataError::SeriesNotFound("D.XXX.EUR.BB.AC.000".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::SeriesNotFound(_) | Self::MalformedPayload(_) => RetryClass::Never,

            Self::RateLimited { .. }
            | Self::Timeout { .. }
            | Self::ProviderError { .. }
            | Self::Network(_) => RetryClass::WithBackoff,

            Self::CircuitOpen { .. } => RetryClass::CircuitOpen,
        }
    }

    /// Whether the upstream explicitly reported absence of data.
    ///
    /// Aggregation over several currencies tolerates exactly this failure kind
    /// and nothing else.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SeriesNotFound(_))
    }

    /// Whether this failure should count against the provider's circuit.
    ///
    /// A not-found answer or an undecodable body still means the provider
    /// responded, so neither is held against it.
    pub fn counts_as_circuit_failure(&self) -> bool {
        !matches!(
            self,
            Self::SeriesNotFound(_) | Self::MalformedPayload(_) | Self::CircuitOpen { .. }
        )
    }
}
