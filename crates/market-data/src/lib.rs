//! EuroFX Market Data Crate
//!
//! This crate fetches daily EUR reference rates from the Deutsche Bundesbank
//! time-series service and decodes its SDMX-JSON responses into rate records.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Series key and query construction for the `BBEX3` dataflow
//! - Tolerant SDMX-JSON decoding (bad observations are skipped, not fatal)
//! - Pluggable currency name resolution
//! - Rate limiting, circuit breaking, retry and time limits around the source
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   Domain Layer   | --> |   SeriesQuery    |  (dataflow, key, period)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | ResilientSource  |  (limit, breaker, retry)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | BundesbankSource |  (HTTP)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |      sdmx        |  (decode + observation walk)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   RateRecord     |
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`SeriesQuery`] - One upstream request: dataflow, series key, period
//! - [`RateRecord`] - One currency's rate against EUR on one day
//! - [`RateSource`] - Anything that answers a query with a raw body
//! - [`NameResolver`] - Currency code to display name lookup
//! - [`MarketDataError`] - Failures, classified for retry and circuit breaking

pub mod errors;
pub mod models;
pub mod provider;
pub mod resilience;
pub mod resolver;
pub mod sdmx;

pub use errors::{MarketDataError, RetryClass};

pub use models::{build_key, format_date, Period, RateRecord, SeriesQuery};

pub use resolver::{resolve_or_code, CodeAsName, NameResolver, ResolveError};

pub use provider::bundesbank::{BundesbankConfig, BundesbankSource};
pub use provider::{RateLimit, RateSource};

pub use resilience::{
    CircuitBreaker, CircuitBreakerConfig, CircuitState, RateLimiter, ResilienceConfig,
    ResilientSource, RetryPolicy,
};

pub use sdmx::{assemble_document, assemble_rates, SdmxDocument, TimePeriodIndex};
