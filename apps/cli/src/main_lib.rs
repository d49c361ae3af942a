use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use eurofx_core::currencies::CurrencyService;
use eurofx_core::fx::ExchangeRateService;
use eurofx_market_data::{BundesbankSource, ResilientSource};

use crate::config::Config;

pub fn init_tracing() {
    let log_format = std::env::var("EUROFX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Wires the Bundesbank source, resilience layer, and catalog into the rate service.
pub fn build_service(config: &Config, currencies: Arc<CurrencyService>) -> ExchangeRateService {
    let source = ResilientSource::new(
        BundesbankSource::new(config.bundesbank.clone()),
        config.resilience.clone(),
    );
    tracing::info!(
        "Using Bundesbank at {} ({} currencies, {} day window)",
        config.bundesbank.base_url,
        config.rates.currencies.len(),
        config.rates.days_range
    );
    ExchangeRateService::new(Arc::new(source), currencies, config.rates.clone())
}
