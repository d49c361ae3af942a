//! Rate source abstractions and implementations.
//!
//! This module contains:
//! - The `RateSource` trait every upstream implements
//! - Rate limiting configuration
//! - The Bundesbank SDMX web service source

mod capabilities;
mod traits;

pub mod bundesbank;

// Re-exports
pub use capabilities::{RateLimit, DEFAULT_REQUEST_TIMEOUT};
pub use traits::RateSource;
