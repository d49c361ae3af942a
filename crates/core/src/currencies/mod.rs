//! Currency catalog - model, service, and traits.

mod currencies_model;
mod currencies_service;
mod currencies_traits;

pub use currencies_model::Currency;
pub use currencies_service::CurrencyService;
pub use currencies_traits::CurrencyServiceTrait;
