//! Core error types for the EuroFX services.
//!
//! Upstream failures arrive as [`MarketDataError`] and are classified here
//! into the domain kinds callers act on: not found, external service failure
//! and arithmetic failure.

use chrono::NaiveDate;
use thiserror::Error;

use eurofx_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for rate retrieval and conversion.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Exchange rate not found for currency {currency} on date {date}")]
    RateNotFound { currency: String, date: NaiveDate },

    #[error("No exchange rates found for date {0}")]
    NoRatesForDate(NaiveDate),

    #[error("External service failure: {message}")]
    ExternalService {
        message: String,
        #[source]
        source: Option<MarketDataError>,
    },

    #[error("Arithmetic failure: {0}")]
    Arithmetic(String),

    #[error("Currency not found with code: {0}")]
    CurrencyNotFound(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

impl Error {
    /// External service failure without an upstream cause.
    pub fn external(message: impl Into<String>) -> Self {
        Error::ExternalService {
            message: message.into(),
            source: None,
        }
    }

    /// True for the not-found kinds.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::RateNotFound { .. } | Error::NoRatesForDate(_) | Error::CurrencyNotFound(_)
        )
    }
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

// === From implementations for common error types ===

impl From<MarketDataError> for Error {
    fn from(err: MarketDataError) -> Self {
        Error::ExternalService {
            message: format!("Error fetching exchange rates: {}", err),
            source: Some(err),
        }
    }
}
