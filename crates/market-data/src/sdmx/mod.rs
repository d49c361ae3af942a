//! SDMX-JSON decoding for the exchange-rate dataflow.
//!
//! ```text
//! raw body --parse--> SdmxDocument
//!                        |            \
//!                        v             v
//!              TimePeriodIndex     dataSets[0].series
//!                        \             /
//!                         v           v
//!                     observation walk --> Vec<RateRecord>
//! ```
//!
//! This is not a general SDMX client: only the daily series shape returned
//! for a single currency key is understood.

mod assembler;
mod document;
mod observations;
mod time_period;

pub use assembler::{assemble_document, assemble_rates};
pub use document::{SdmxDocument, TIME_PERIOD_DIMENSION};
pub use observations::{extract_observations, extract_rates, observation_text, parse_rate};
pub use time_period::{parse_period, TimePeriodIndex};
