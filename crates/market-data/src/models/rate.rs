use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One currency's rate against EUR on one day.
///
/// Built fresh for every request and handed to the caller; never cached.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RateRecord {
    pub currency_code: String,
    /// Display name, or the code itself when the name could not be resolved.
    pub currency_name: String,
    pub date: NaiveDate,
    pub rate: Decimal,
}

impl RateRecord {
    pub fn new(
        currency_code: impl Into<String>,
        currency_name: impl Into<String>,
        date: NaiveDate,
        rate: Decimal,
    ) -> Self {
        Self {
            currency_code: currency_code.into(),
            currency_name: currency_name.into(),
            date,
            rate,
        }
    }
}
