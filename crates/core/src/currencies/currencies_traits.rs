use super::Currency;
use crate::errors::Result;

/// Trait defining the contract for currency catalog operations.
pub trait CurrencyServiceTrait: Send + Sync {
    fn get_all_currencies(&self) -> Vec<Currency>;
    fn get_active_currencies(&self) -> Vec<Currency>;
    /// Fails with `CurrencyNotFound` for an unknown code.
    fn get_currency_by_code(&self, code: &str) -> Result<Currency>;
    fn get_currencies_by_country(&self, country: &str) -> Vec<Currency>;
}
