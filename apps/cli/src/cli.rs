//! Command-line definitions.
//!
//! ```bash
//! # All currencies over the default window
//! eurofx rates
//!
//! # All currencies on one day
//! eurofx rates --date 2025-04-09
//!
//! # One currency on one day
//! eurofx rate USD 2025-04-09
//!
//! # Convert 100 USD into EUR at that day's rate
//! eurofx convert 100 USD 2025-04-09
//!
//! # Currency catalog
//! eurofx currencies --active
//! ```

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// Daily EUR reference rates from the Deutsche Bundesbank.
#[derive(Debug, Parser)]
#[command(name = "eurofx", author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rates for every configured currency.
    ///
    /// Without --date, covers the configured window ending today.
    Rates {
        /// Single day (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Rate of one currency on one day.
    Rate {
        /// Currency code, e.g. USD.
        code: String,
        /// Day (YYYY-MM-DD).
        date: NaiveDate,
    },

    /// Convert an amount into EUR.
    Convert {
        amount: Decimal,
        /// Source currency code.
        from: String,
        /// Day whose rate is used (YYYY-MM-DD).
        date: NaiveDate,
    },

    /// List the currency catalog.
    Currencies {
        /// Only active currencies.
        #[arg(long, default_value_t = false)]
        active: bool,

        /// Only currencies of this country.
        #[arg(long)]
        country: Option<String>,
    },
}
