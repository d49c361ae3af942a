use serde::{Deserialize, Serialize};

use eurofx_market_data::models::{DEFAULT_DATAFLOW_ID, DEFAULT_FORMAT, DEFAULT_LANGUAGE};

use crate::constants::{
    BASE_CURRENCY, CURRENCY_CODE_LEN, DEFAULT_CURRENCIES, DEFAULT_DAYS_RANGE, MAX_DAYS_RANGE,
};
use crate::errors::{Error, Result};

/// Settings that drive rate aggregation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RatesSettings {
    /// Identity-rate currency. Conversions always target EUR, so this must be EUR.
    pub base_currency: String,
    /// Currencies reported by the multi-currency operations. The base
    /// currency may be listed; it is synthesized, never fetched.
    pub currencies: Vec<String>,
    /// Days before the end date included in the default window.
    pub days_range: i64,
    pub dataflow_id: String,
    pub format: String,
    pub language: String,
}

impl Default for RatesSettings {
    fn default() -> Self {
        Self {
            base_currency: BASE_CURRENCY.to_string(),
            currencies: DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect(),
            days_range: DEFAULT_DAYS_RANGE,
            dataflow_id: DEFAULT_DATAFLOW_ID.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl RatesSettings {
    /// Configured currencies that are fetched upstream, in configured order.
    pub fn fetched_currencies(&self) -> impl Iterator<Item = &str> + '_ {
        self.currencies
            .iter()
            .map(String::as_str)
            .filter(move |code| *code != self.base_currency)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_currency != BASE_CURRENCY {
            return Err(Error::InvalidConfigValue(format!(
                "base currency must be {}, got '{}'",
                BASE_CURRENCY, self.base_currency
            )));
        }

        if self.currencies.is_empty() {
            return Err(Error::InvalidConfigValue(
                "currency list must not be empty".to_string(),
            ));
        }

        if let Some(code) = std::iter::once(&self.base_currency)
            .chain(self.currencies.iter())
            .find(|code| !is_currency_code(code))
        {
            return Err(Error::InvalidConfigValue(format!(
                "'{}' is not a 3-letter currency code",
                code
            )));
        }

        if !(0..=MAX_DAYS_RANGE).contains(&self.days_range) {
            return Err(Error::InvalidConfigValue(format!(
                "days range must be between 0 and {}, got {}",
                MAX_DAYS_RANGE, self.days_range
            )));
        }

        if self.dataflow_id.trim().is_empty() {
            return Err(Error::InvalidConfigValue(
                "dataflow id must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// True for a code of three ASCII letters.
pub(crate) fn is_currency_code(code: &str) -> bool {
    code.len() == CURRENCY_CODE_LEN && code.chars().all(|c| c.is_ascii_alphabetic())
}
