//! FX (Foreign Exchange) module - rate aggregation, conversion, and traits.

pub mod currency_converter;
mod fx_model;
mod fx_service;
mod fx_traits;

#[cfg(test)]
mod fx_service_tests;

pub use currency_converter::{convert, convert_amount};
pub use fx_model::{ConversionRequest, ConversionResult};
pub use fx_service::ExchangeRateService;
pub use fx_traits::ExchangeRateServiceTrait;
