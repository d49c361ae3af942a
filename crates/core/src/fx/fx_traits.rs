use async_trait::async_trait;
use chrono::NaiveDate;

use super::fx_model::{ConversionRequest, ConversionResult};
use crate::errors::Result;
use eurofx_market_data::RateRecord;

/// Trait defining the contract for exchange rate operations.
#[async_trait]
pub trait ExchangeRateServiceTrait: Send + Sync {
    /// Rates for every configured currency over the default window ending today.
    async fn get_all_rates(&self) -> Result<Vec<RateRecord>>;

    /// Rates for every configured currency on `date`.
    async fn get_rates_by_date(&self, date: NaiveDate) -> Result<Vec<RateRecord>>;

    async fn get_rate_by_currency_and_date(
        &self,
        currency_code: &str,
        date: NaiveDate,
    ) -> Result<RateRecord>;

    /// Converts `request.amount` into the base currency at the rate of `request.date`.
    async fn convert_to_base(&self, request: &ConversionRequest) -> Result<ConversionResult>;
}
