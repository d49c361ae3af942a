//! Deutsche Bundesbank time-series web service.
//!
//! Exchange rates against EUR are published in the `BBEX3` dataflow as daily
//! series keyed `D.<CCY>.EUR.BB.AC.000`.
//!
//! # API Endpoint
//!
//! - Series data: `{base}/data/{flowRef}/{key}?format=json&lang=en&startPeriod=YYYY-MM-DD&endPeriod=YYYY-MM-DD`
//!
//! An unknown key, or a period without observations, is answered with
//! HTTP 404 and surfaces as [`MarketDataError::SeriesNotFound`].

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};

use crate::errors::MarketDataError;
use crate::models::SeriesQuery;
use crate::provider::{RateLimit, RateSource, DEFAULT_REQUEST_TIMEOUT};

/// Provider ID constant
pub const PROVIDER_ID: &str = "BUNDESBANK";

/// Public REST endpoint of the Bundesbank statistics API.
pub const DEFAULT_BASE_URL: &str = "https://api.statistiken.bundesbank.de/rest";

/// Connection settings for [`BundesbankSource`].
#[derive(Clone, Debug, PartialEq)]
pub struct BundesbankConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub rate_limit: RateLimit,
}

impl Default for BundesbankConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            rate_limit: RateLimit::default(),
        }
    }
}

/// Bundesbank source for daily EUR reference rates.
///
/// # Example
///
/// ```ignore
/// let source = BundesbankSource::new(BundesbankConfig::default());
/// let body = source.fetch(&SeriesQuery::for_currency("USD", period)).await?;
/// ```
pub struct BundesbankSource {
    client: Client,
    config: BundesbankConfig,
}

impl BundesbankSource {
    pub fn new(config: BundesbankConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// Path of the series resource, without query parameters.
    fn series_url(&self, query: &SeriesQuery) -> String {
        format!(
            "{}/data/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            query.dataflow_id,
            query.key
        )
    }

    /// Maps a non-success status to the matching error.
    fn check_status(status: StatusCode, key: &str, body: &str) -> Result<(), MarketDataError> {
        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::NOT_FOUND {
            return Err(MarketDataError::SeriesNotFound(key.to_string()));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        Err(MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("HTTP {} - {}", status, body.trim()),
        })
    }
}

impl Default for BundesbankSource {
    fn default() -> Self {
        Self::new(BundesbankConfig::default())
    }
}

#[async_trait]
impl RateSource for BundesbankSource {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn rate_limit(&self) -> RateLimit {
        self.config.rate_limit.clone()
    }

    async fn fetch(&self, query: &SeriesQuery) -> Result<String, MarketDataError> {
        let url = self.series_url(query);
        debug!("Bundesbank request: {} {:?}", url, query.params());

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query.params())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::Network(e)
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        Self::check_status(status, &query.key, &body)?;
        Ok(body)
    }
}
