mod cli;
mod config;
mod main_lib;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use cli::{Cli, Command};
use config::Config;
use eurofx_core::currencies::{CurrencyService, CurrencyServiceTrait};
use eurofx_core::fx::{ConversionRequest, ExchangeRateServiceTrait};
use main_lib::{build_service, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let currencies = Arc::new(CurrencyService::seeded());
    let service = build_service(&config, currencies.clone());

    match cli.command {
        Command::Rates { date: None } => {
            let rates = service.get_all_rates().await?;
            print_json(&rates)
        }
        Command::Rates { date: Some(date) } => {
            let rates = service.get_rates_by_date(date).await?;
            print_json(&rates)
        }
        Command::Rate { code, date } => {
            let rate = service
                .get_rate_by_currency_and_date(&code.to_ascii_uppercase(), date)
                .await?;
            print_json(&rate)
        }
        Command::Convert { amount, from, date } => {
            let request = ConversionRequest::new(amount, from.to_ascii_uppercase(), date);
            request.validate()?;
            let result = service.convert_to_base(&request).await?;
            print_json(&result)
        }
        Command::Currencies { active, country } => {
            let list: Vec<_> = match country {
                Some(country) => currencies
                    .get_currencies_by_country(&country)
                    .into_iter()
                    .filter(|c| !active || c.active)
                    .collect(),
                None if active => currencies.get_active_currencies(),
                None => currencies.get_all_currencies(),
            };
            print_json(&list)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", out);
    Ok(())
}
