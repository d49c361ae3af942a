//! EuroFX Core - Domain services, models, and traits.
//!
//! This crate aggregates daily EUR reference rates across currencies,
//! synthesizes the EUR identity rate, and converts amounts into EUR.
//! Upstream access is abstracted behind `eurofx_market_data::RateSource`.

pub mod constants;
pub mod currencies;
pub mod errors;
pub mod fx;
pub mod settings;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
