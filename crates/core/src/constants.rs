/// Fixed conversion target and identity-rate currency
pub const BASE_CURRENCY: &str = "EUR";

/// Fractional digits of a converted amount
pub const DECIMAL_SCALE: u32 = 2;

/// Length of an ISO 4217 currency code
pub const CURRENCY_CODE_LEN: usize = 3;

/// Currencies fetched when no list is configured
pub const DEFAULT_CURRENCIES: [&str; 5] = ["USD", "EUR", "GBP", "JPY", "CHF"];

/// Days before the end date covered by the default window
pub const DEFAULT_DAYS_RANGE: i64 = 30;

/// Longest window the multi-currency query accepts, in days
pub const MAX_DAYS_RANGE: i64 = 3650;
