use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::settings::is_currency_code;

/// Request to convert an amount in a foreign currency into EUR.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub amount: Decimal,
    pub from_currency: String,
    pub date: NaiveDate,
}

impl ConversionRequest {
    pub fn new(amount: Decimal, from_currency: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            from_currency: from_currency.into(),
            date,
        }
    }

    /// Checks the request at the input boundary.
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "Amount must be greater than zero, got {}",
                self.amount
            ))
            .into());
        }
        if self.from_currency.is_empty() {
            return Err(ValidationError::MissingField("fromCurrency".to_string()).into());
        }
        if !is_currency_code(&self.from_currency) {
            return Err(ValidationError::InvalidInput(format!(
                "Currency code must be 3 letters, got '{}'",
                self.from_currency
            ))
            .into());
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub amount: Decimal,
    pub from_currency: String,
    /// Rounded half-up to two fractional digits.
    pub converted_amount: Decimal,
    pub to_currency: String,
    pub exchange_rate: Decimal,
    pub date: NaiveDate,
}
