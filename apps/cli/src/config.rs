use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use eurofx_core::settings::RatesSettings;
use eurofx_market_data::{BundesbankConfig, ResilienceConfig};

/// Runtime configuration assembled from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub bundesbank: BundesbankConfig,
    pub resilience: ResilienceConfig,
    pub rates: RatesSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut bundesbank = BundesbankConfig::default();
        if let Some(url) = non_empty_var("BUNDESBANK_API_URL") {
            bundesbank.base_url = url;
        }
        if let Some(secs) = non_empty_var("BUNDESBANK_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("BUNDESBANK_TIMEOUT_SECS is not a number: {}", secs))?;
            bundesbank.request_timeout = Duration::from_secs(secs);
        }

        let mut rates = RatesSettings::default();
        if let Some(flow) = non_empty_var("BUNDESBANK_DATAFLOW_ID") {
            rates.dataflow_id = flow;
        }
        if let Some(list) = non_empty_var("EUROFX_CURRENCIES") {
            rates.currencies = parse_currency_list(&list);
        }
        if let Some(days) = non_empty_var("EUROFX_DAYS_RANGE") {
            rates.days_range = days
                .parse()
                .with_context(|| format!("EUROFX_DAYS_RANGE is not a number: {}", days))?;
        }
        rates.validate().context("invalid rate settings")?;

        Ok(Self {
            bundesbank,
            resilience: ResilienceConfig::default(),
            rates,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Splits a comma list into upper-case codes, dropping blanks.
fn parse_currency_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|code| code.trim().to_ascii_uppercase())
        .filter(|code| !code.is_empty())
        .collect()
}
