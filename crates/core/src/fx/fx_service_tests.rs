//! Tests for ExchangeRateService against a scripted rate source.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use rust_decimal_macros::dec;
use serde_json::{json, Map, Value};

use eurofx_market_data::{build_key, MarketDataError, RateSource, SeriesQuery};

use super::{ConversionRequest, ExchangeRateService, ExchangeRateServiceTrait};
use crate::currencies::CurrencyService;
use crate::errors::Error;
use crate::settings::RatesSettings;

// =========================================================================
// Mock RateSource
// =========================================================================

enum Reply {
    Body(String),
    NotFound,
    Fail,
}

#[derive(Default)]
struct MockRateSource {
    replies: HashMap<String, Reply>,
    calls: AtomicUsize,
    queries: Mutex<Vec<SeriesQuery>>,
}

impl MockRateSource {
    fn new() -> Self {
        Self::default()
    }

    fn with_rates(mut self, currency: &str, observations: &[(&str, &str)]) -> Self {
        self.replies
            .insert(build_key(currency), Reply::Body(sdmx_body(observations)));
        self
    }

    fn with_body(mut self, currency: &str, body: &str) -> Self {
        self.replies
            .insert(build_key(currency), Reply::Body(body.to_string()));
        self
    }

    fn with_not_found(mut self, currency: &str) -> Self {
        self.replies.insert(build_key(currency), Reply::NotFound);
        self
    }

    fn with_failure(mut self, currency: &str) -> Self {
        self.replies.insert(build_key(currency), Reply::Fail);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn queried_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .queries
            .lock()
            .unwrap()
            .iter()
            .map(|q| q.key.clone())
            .collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl RateSource for MockRateSource {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn fetch(&self, query: &SeriesQuery) -> Result<String, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());

        match self.replies.get(&query.key) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Fail) => Err(MarketDataError::ProviderError {
                provider: "MOCK".to_string(),
                message: "HTTP 500 Internal Server Error".to_string(),
            }),
            Some(Reply::NotFound) | None => Err(MarketDataError::SeriesNotFound(query.key.clone())),
        }
    }
}

/// Single-series SDMX-JSON body with one observation per (date, value).
fn sdmx_body(observations: &[(&str, &str)]) -> String {
    let periods: Vec<Value> = observations
        .iter()
        .map(|(date, _)| json!({ "id": date }))
        .collect();
    let values: Map<String, Value> = observations
        .iter()
        .enumerate()
        .map(|(i, (_, value))| (i.to_string(), json!([value, 0, 0])))
        .collect();

    json!({
        "data": {
            "structure": { "dimensions": { "observation": [
                { "id": "TIME_PERIOD", "values": periods }
            ] } },
            "dataSets": [ { "series": { "0:0:0:0:0": { "observations": values } } } ]
        }
    })
    .to_string()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service(source: Arc<MockRateSource>) -> ExchangeRateService {
    ExchangeRateService::new(
        source,
        Arc::new(CurrencyService::seeded()),
        RatesSettings::default(),
    )
}

// =========================================================================
// get_rate_by_currency_and_date
// =========================================================================

#[tokio::test]
async fn test_base_currency_is_synthesized_without_fetching() {
    let source = Arc::new(MockRateSource::new());
    let svc = service(source.clone());

    let rate = svc
        .get_rate_by_currency_and_date("EUR", date(2025, 4, 9))
        .await
        .unwrap();

    assert_eq!(rate.currency_code, "EUR");
    assert_eq!(rate.currency_name, "Euro");
    assert_eq!(rate.date, date(2025, 4, 9));
    assert_eq!(rate.rate, dec!(1));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_single_currency_rate() {
    let source =
        Arc::new(MockRateSource::new().with_rates("USD", &[("2025-04-09", "1.0955")]));
    let svc = service(source.clone());

    let rate = svc
        .get_rate_by_currency_and_date("USD", date(2025, 4, 9))
        .await
        .unwrap();

    assert_eq!(rate.currency_name, "US Dollar");
    assert_eq!(rate.rate, dec!(1.0955));

    let queries = source.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].dataflow_id, "BBEX3");
    assert_eq!(queries[0].key, "D.USD.EUR.BB.AC.000");
    let period = queries[0].period.unwrap();
    assert_eq!(period.start, date(2025, 4, 9));
    assert_eq!(period.end, date(2025, 4, 9));
}

#[tokio::test]
async fn test_single_currency_upstream_not_found() {
    let svc = service(Arc::new(MockRateSource::new().with_not_found("USD")));

    let err = svc
        .get_rate_by_currency_and_date("USD", date(2025, 4, 9))
        .await
        .unwrap_err();

    match err {
        Error::RateNotFound { currency, date: d } => {
            assert_eq!(currency, "USD");
            assert_eq!(d, date(2025, 4, 9));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_single_currency_other_date_only_is_not_found() {
    let svc = service(Arc::new(
        MockRateSource::new().with_rates("USD", &[("2025-04-08", "1.09")]),
    ));

    let err = svc
        .get_rate_by_currency_and_date("USD", date(2025, 4, 9))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RateNotFound { .. }));
}

#[tokio::test]
async fn test_single_currency_upstream_failure_is_external() {
    let svc = service(Arc::new(MockRateSource::new().with_failure("USD")));

    let err = svc
        .get_rate_by_currency_and_date("USD", date(2025, 4, 9))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ExternalService {
            source: Some(MarketDataError::ProviderError { .. }),
            ..
        }
    ));
}

#[tokio::test]
async fn test_malformed_payload_is_external() {
    let svc = service(Arc::new(
        MockRateSource::new().with_body("USD", "<html>maintenance</html>"),
    ));

    let err = svc
        .get_rate_by_currency_and_date("USD", date(2025, 4, 9))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ExternalService {
            source: Some(MarketDataError::MalformedPayload(_)),
            ..
        }
    ));
}

// =========================================================================
// get_rates_by_date
// =========================================================================

#[tokio::test]
async fn test_rates_by_date_tolerates_not_found() {
    let source = Arc::new(
        MockRateSource::new()
            .with_rates("USD", &[("2025-04-09", "1.0955")])
            .with_not_found("GBP")
            .with_rates("JPY", &[("2025-04-09", "161.87")])
            .with_rates("CHF", &[("2025-04-09", "0.9397")]),
    );
    let svc = service(source.clone());

    let rates = svc.get_rates_by_date(date(2025, 4, 9)).await.unwrap();

    let codes: Vec<&str> = rates.iter().map(|r| r.currency_code.as_str()).collect();
    assert_eq!(codes, vec!["USD", "JPY", "CHF", "EUR"]);
    assert_eq!(rates[3].rate, dec!(1));
    assert_eq!(rates[3].date, date(2025, 4, 9));

    // EUR is never fetched
    assert_eq!(source.calls(), 4);
    assert_eq!(
        source.queried_keys(),
        vec![
            "D.CHF.EUR.BB.AC.000",
            "D.GBP.EUR.BB.AC.000",
            "D.JPY.EUR.BB.AC.000",
            "D.USD.EUR.BB.AC.000"
        ]
    );
}

#[tokio::test]
async fn test_rates_by_date_fails_on_other_error() {
    let svc = service(Arc::new(
        MockRateSource::new()
            .with_rates("USD", &[("2025-04-09", "1.0955")])
            .with_failure("GBP")
            .with_rates("JPY", &[("2025-04-09", "161.87")])
            .with_rates("CHF", &[("2025-04-09", "0.9397")]),
    ));

    let err = svc.get_rates_by_date(date(2025, 4, 9)).await.unwrap_err();
    assert!(matches!(err, Error::ExternalService { .. }));
}

#[tokio::test]
async fn test_rates_by_date_filters_other_dates() {
    let svc = service(Arc::new(MockRateSource::new().with_rates(
        "USD",
        &[("2025-04-08", "1.0900"), ("2025-04-09", "1.0955")],
    )));

    let rates = svc.get_rates_by_date(date(2025, 4, 9)).await.unwrap();

    assert_eq!(rates.len(), 2);
    assert!(rates.iter().all(|r| r.date == date(2025, 4, 9)));
    assert_eq!(rates[0].rate, dec!(1.0955));
}

#[tokio::test]
async fn test_rates_by_date_nothing_found() {
    let svc = service(Arc::new(MockRateSource::new()));

    let err = svc.get_rates_by_date(date(2025, 4, 9)).await.unwrap_err();
    assert!(matches!(err, Error::NoRatesForDate(d) if d == date(2025, 4, 9)));
    assert!(err.is_not_found());
}

// =========================================================================
// get_all_rates
// =========================================================================

#[tokio::test]
async fn test_all_rates_synthesizes_base_for_each_day() {
    let end = date(2025, 4, 9);
    let source = Arc::new(
        MockRateSource::new()
            .with_rates("USD", &[("2025-04-08", "1.0900"), ("2025-04-09", "1.0955")])
            .with_rates("CHF", &[("2025-04-09", "0.9397")]),
    );
    let svc = service(source.clone());

    let rates = svc.get_all_rates_as_of(end).await.unwrap();

    let euro: Vec<_> = rates.iter().filter(|r| r.currency_code == "EUR").collect();
    assert_eq!(euro.len(), 31);
    assert!(euro.iter().all(|r| r.rate == dec!(1)));
    assert_eq!(euro[0].date, end);
    assert_eq!(euro[30].date, end - Duration::days(30));

    let mut days: Vec<NaiveDate> = euro.iter().map(|r| r.date).collect();
    days.sort();
    days.dedup();
    assert_eq!(days.len(), 31);

    // fetched currencies first, synthetic records last
    assert_eq!(rates.len(), 3 + 31);
    assert_eq!(rates[0].currency_code, "USD");
    assert_eq!(rates[2].currency_code, "CHF");
    assert!(rates[3..].iter().all(|r| r.currency_code == "EUR"));

    let period = source.queries.lock().unwrap()[0].period.unwrap();
    assert_eq!(period.start, date(2025, 3, 10));
    assert_eq!(period.end, end);
}

#[tokio::test]
async fn test_all_rates_with_every_currency_missing() {
    let svc = service(Arc::new(MockRateSource::new()));

    let rates = svc.get_all_rates_as_of(date(2025, 4, 9)).await.unwrap();
    assert_eq!(rates.len(), 31);
}

#[tokio::test]
async fn test_all_rates_window_ends_today() {
    let source = Arc::new(MockRateSource::new());
    let svc = service(source.clone());

    let rates = svc.get_all_rates().await.unwrap();

    let today = crate::utils::time_utils::today();
    assert_eq!(rates.len(), 31);
    assert_eq!(rates[0].date, today);
    assert_eq!(rates[30].date, today - Duration::days(30));

    let period = source.queries.lock().unwrap()[0].period.unwrap();
    assert_eq!(period.end, today);
}

#[tokio::test]
async fn test_all_rates_rejects_window_before_calendar_start() {
    let source = Arc::new(MockRateSource::new());
    let settings = RatesSettings {
        days_range: i64::MAX / 2,
        ..Default::default()
    };
    let svc = ExchangeRateService::new(source.clone(), Arc::new(CurrencyService::seeded()), settings);

    let err = svc.get_all_rates_as_of(date(2025, 4, 9)).await.unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue(_)));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_all_rates_rejects_negative_window() {
    let settings = RatesSettings {
        days_range: -1,
        ..Default::default()
    };
    let svc = ExchangeRateService::new(
        Arc::new(MockRateSource::new()),
        Arc::new(CurrencyService::seeded()),
        settings,
    );

    let err = svc.get_all_rates_as_of(date(2025, 4, 9)).await.unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue(_)));
}

#[tokio::test]
async fn test_all_rates_fails_on_other_error() {
    let svc = service(Arc::new(MockRateSource::new().with_failure("JPY")));

    let err = svc.get_all_rates_as_of(date(2025, 4, 9)).await.unwrap_err();
    assert!(matches!(err, Error::ExternalService { .. }));
}

#[tokio::test]
async fn test_all_rates_uses_configured_window_and_currencies() {
    let source = Arc::new(MockRateSource::new().with_rates("SEK", &[("2025-04-09", "10.95")]));
    let settings = RatesSettings {
        currencies: vec!["SEK".to_string()],
        days_range: 2,
        ..Default::default()
    };
    let svc = ExchangeRateService::new(source.clone(), Arc::new(CurrencyService::seeded()), settings);

    let rates = svc.get_all_rates_as_of(date(2025, 4, 9)).await.unwrap();

    assert_eq!(source.calls(), 1);
    assert_eq!(rates.len(), 1 + 3);
    // not in the catalog: the code doubles as the name
    assert_eq!(rates[0].currency_name, "SEK");
}

// =========================================================================
// convert_to_base
// =========================================================================

#[tokio::test]
async fn test_convert_to_base() {
    let svc = service(Arc::new(
        MockRateSource::new().with_rates("USD", &[("2025-04-09", "0.92")]),
    ));
    let request = ConversionRequest::new(dec!(100), "USD", date(2025, 4, 9));

    let result = svc.convert_to_base(&request).await.unwrap();

    assert_eq!(result.converted_amount, dec!(108.70));
    assert_eq!(result.exchange_rate, dec!(0.92));
    assert_eq!(result.from_currency, "USD");
    assert_eq!(result.to_currency, "EUR");
}

#[tokio::test]
async fn test_convert_base_currency_is_identity() {
    let source = Arc::new(MockRateSource::new());
    let svc = service(source.clone());
    let request = ConversionRequest::new(dec!(42.5), "EUR", date(2025, 4, 9));

    let result = svc.convert_to_base(&request).await.unwrap();

    assert_eq!(result.converted_amount, dec!(42.50));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_convert_with_zero_rate() {
    let svc = service(Arc::new(
        MockRateSource::new().with_rates("USD", &[("2025-04-09", "0")]),
    ));
    let request = ConversionRequest::new(dec!(100), "USD", date(2025, 4, 9));

    let err = svc.convert_to_base(&request).await.unwrap_err();
    assert!(matches!(err, Error::Arithmetic(_)));
}

#[tokio::test]
async fn test_convert_missing_rate() {
    let svc = service(Arc::new(MockRateSource::new()));
    let request = ConversionRequest::new(dec!(100), "GBP", date(2025, 4, 9));

    let err = svc.convert_to_base(&request).await.unwrap_err();
    assert!(matches!(err, Error::RateNotFound { .. }));
}
