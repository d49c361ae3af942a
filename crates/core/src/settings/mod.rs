//! Rate retrieval settings.

mod settings_model;

pub(crate) use settings_model::is_currency_code;
pub use settings_model::RatesSettings;
