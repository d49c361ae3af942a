//! Upstream query construction.
//!
//! Builds the SDMX series key and the period parameters for a single
//! currency request against the exchange-rate dataflow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default exchange-rate dataflow identifier.
pub const DEFAULT_DATAFLOW_ID: &str = "BBEX3";

/// Default response format requested from the upstream service.
pub const DEFAULT_FORMAT: &str = "json";

/// Default language for upstream descriptions.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Frequency dimension prefix (daily).
const KEY_PREFIX: &str = "D.";

/// Fixed dimension suffix: EUR counterpart, bank-reported rate, unadjusted.
const KEY_SUFFIX: &str = ".EUR.BB.AC.000";

/// Date format used for `startPeriod` / `endPeriod`.
const PERIOD_FORMAT: &str = "%Y-%m-%d";

/// Builds the series key for a currency code.
///
/// ```
/// use eurofx_market_data::models::build_key;
///
/// assert_eq!(build_key("USD"), "D.USD.EUR.BB.AC.000");
/// ```
pub fn build_key(currency_code: &str) -> String {
    format!("{}{}{}", KEY_PREFIX, currency_code, KEY_SUFFIX)
}

/// Renders a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(PERIOD_FORMAT).to_string()
}

/// Inclusive date range requested from the upstream service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A period covering exactly one day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }
}

/// A fully specified upstream data request.
///
/// Mirrors the parameters of the outbound fetch:
/// `fetch(dataflowId, key, format, language, startDate, endDate)`.
/// Without a period the whole series is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    pub dataflow_id: String,
    pub key: String,
    pub format: String,
    pub language: String,
    pub period: Option<Period>,
}

impl SeriesQuery {
    /// Query for one currency over a period, using the default dataflow,
    /// format, and language.
    pub fn for_currency(currency_code: &str, period: Period) -> Self {
        Self {
            dataflow_id: DEFAULT_DATAFLOW_ID.to_string(),
            key: build_key(currency_code),
            format: DEFAULT_FORMAT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            period: Some(period),
        }
    }

    pub fn with_dataflow(mut self, dataflow_id: impl Into<String>) -> Self {
        self.dataflow_id = dataflow_id.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Drops the period so the full series is requested.
    pub fn whole_series(mut self) -> Self {
        self.period = None;
        self
    }

    /// Query-string parameters in request order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", self.format.clone()),
            ("lang", self.language.clone()),
        ];
        if let Some(period) = self.period {
            params.push(("startPeriod", format_date(period.start)));
            params.push(("endPeriod", format_date(period.end)));
        }
        params
    }
}
