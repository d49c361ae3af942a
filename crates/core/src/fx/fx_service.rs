use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use futures::future::try_join_all;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use eurofx_market_data::{
    assemble_rates, resolve_or_code, MarketDataError, NameResolver, Period, RateRecord,
    RateSource, SeriesQuery,
};

use super::currency_converter;
use super::fx_model::{ConversionRequest, ConversionResult};
use super::fx_traits::ExchangeRateServiceTrait;
use crate::errors::{Error, Result};
use crate::settings::RatesSettings;
use crate::utils::time_utils::{get_days_between, today};

/// Aggregates per-currency upstream rates and synthesizes the base currency.
///
/// Stateless between calls: every operation fetches and decodes afresh.
#[derive(Clone)]
pub struct ExchangeRateService {
    source: Arc<dyn RateSource>,
    names: Arc<dyn NameResolver>,
    settings: RatesSettings,
}

impl ExchangeRateService {
    pub fn new(
        source: Arc<dyn RateSource>,
        names: Arc<dyn NameResolver>,
        settings: RatesSettings,
    ) -> Self {
        Self {
            source,
            names,
            settings,
        }
    }

    pub fn settings(&self) -> &RatesSettings {
        &self.settings
    }

    /// Rates for every configured currency over the window ending at `end`.
    ///
    /// One base-currency record per day of the window is appended after the
    /// fetched currencies, newest first.
    pub async fn get_all_rates_as_of(&self, end: NaiveDate) -> Result<Vec<RateRecord>> {
        let start = self.window_start(end)?;
        info!("Getting all exchange rates from {} to {}", start, end);

        let mut rates = self.fetch_all(Period::new(start, end)).await?;

        let mut days = get_days_between(start, end);
        days.reverse();
        rates.extend(days.into_iter().map(|day| self.base_rate(day)));

        if rates.is_empty() {
            return Err(Error::external("no rates could be fetched"));
        }
        Ok(rates)
    }

    /// First day of the window ending at `end`.
    fn window_start(&self, end: NaiveDate) -> Result<NaiveDate> {
        u64::try_from(self.settings.days_range)
            .ok()
            .and_then(|days| end.checked_sub_days(Days::new(days)))
            .ok_or_else(|| {
                Error::InvalidConfigValue(format!(
                    "days range {} does not fit before {}",
                    self.settings.days_range, end
                ))
            })
    }

    fn query(&self, currency_code: &str, period: Period) -> SeriesQuery {
        SeriesQuery::for_currency(currency_code, period)
            .with_dataflow(self.settings.dataflow_id.as_str())
            .with_format(self.settings.format.as_str())
            .with_language(self.settings.language.as_str())
    }

    /// Fetches and decodes one currency's series over `period`.
    async fn fetch_rates(
        &self,
        currency_code: &str,
        period: Period,
    ) -> std::result::Result<Vec<RateRecord>, MarketDataError> {
        let query = self.query(currency_code, period);
        debug!("Fetching {} {}", query.dataflow_id, query.key);

        let body = self.source.fetch(&query).await?;
        assemble_rates(currency_code, &body, self.names.as_ref())
    }

    /// Like [`fetch_rates`](Self::fetch_rates), but an upstream not-found
    /// yields no records instead of an error.
    async fn fetch_rates_tolerant(
        &self,
        currency_code: &str,
        period: Period,
    ) -> Result<Vec<RateRecord>> {
        match self.fetch_rates(currency_code, period).await {
            Ok(rates) => Ok(rates),
            Err(e) if e.is_not_found() => {
                warn!(
                    "No exchange rates found for currency {} from {} to {}",
                    currency_code, period.start, period.end
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Fetches every non-base configured currency concurrently. Results keep
    /// the configured order; the first non-not-found failure aborts the call.
    async fn fetch_all(&self, period: Period) -> Result<Vec<RateRecord>> {
        let fetches = self
            .settings
            .fetched_currencies()
            .map(|code| self.fetch_rates_tolerant(code, period));

        let per_currency = try_join_all(fetches).await?;
        Ok(per_currency.into_iter().flatten().collect())
    }

    fn base_rate(&self, date: NaiveDate) -> RateRecord {
        let code = self.settings.base_currency.as_str();
        RateRecord::new(
            code,
            resolve_or_code(self.names.as_ref(), code),
            date,
            Decimal::ONE,
        )
    }
}

#[async_trait]
impl ExchangeRateServiceTrait for ExchangeRateService {
    async fn get_all_rates(&self) -> Result<Vec<RateRecord>> {
        self.get_all_rates_as_of(today()).await
    }

    async fn get_rates_by_date(&self, date: NaiveDate) -> Result<Vec<RateRecord>> {
        info!("Getting exchange rates for date: {}", date);

        let mut rates: Vec<RateRecord> = self
            .fetch_all(Period::single_day(date))
            .await?
            .into_iter()
            .filter(|rate| rate.date == date)
            .collect();

        // checked before the synthetic base record is added
        if rates.is_empty() {
            warn!("No exchange rates found for date: {}", date);
            return Err(Error::NoRatesForDate(date));
        }

        rates.push(self.base_rate(date));
        Ok(rates)
    }

    async fn get_rate_by_currency_and_date(
        &self,
        currency_code: &str,
        date: NaiveDate,
    ) -> Result<RateRecord> {
        info!(
            "Getting exchange rate for currency: {} and date: {}",
            currency_code, date
        );

        if currency_code == self.settings.base_currency {
            return Ok(self.base_rate(date));
        }

        let not_found = || Error::RateNotFound {
            currency: currency_code.to_string(),
            date,
        };

        let rates = match self
            .fetch_rates(currency_code, Period::single_day(date))
            .await
        {
            Ok(rates) => rates,
            Err(e) if e.is_not_found() => return Err(not_found()),
            Err(e) => return Err(e.into()),
        };

        rates
            .into_iter()
            .find(|rate| rate.date == date)
            .ok_or_else(not_found)
    }

    async fn convert_to_base(&self, request: &ConversionRequest) -> Result<ConversionResult> {
        info!(
            "Converting {} {} to {} on {}",
            request.amount, request.from_currency, self.settings.base_currency, request.date
        );

        let rate = self
            .get_rate_by_currency_and_date(&request.from_currency, request.date)
            .await?;
        currency_converter::convert(request, &rate)
    }
}
