use log::{debug, info};

use eurofx_market_data::{NameResolver, ResolveError};

use super::{Currency, CurrencyServiceTrait};
use crate::errors::{Error, Result};

/// In-memory currency catalog.
///
/// Lookups by code ignore ASCII case. Entries keep their seeded order.
#[derive(Debug, Clone)]
pub struct CurrencyService {
    currencies: Vec<Currency>,
}

impl CurrencyService {
    pub fn new(currencies: Vec<Currency>) -> Self {
        Self { currencies }
    }

    /// Catalog of the currencies reported by default.
    pub fn seeded() -> Self {
        Self::new(vec![
            Currency::new("USD", "US Dollar", "United States", true),
            Currency::new("EUR", "Euro", "European Union", true),
            Currency::new("GBP", "British Pound", "United Kingdom", true),
            Currency::new("JPY", "Japanese Yen", "Japan", true),
            Currency::new("CHF", "Swiss Franc", "Switzerland", true),
        ])
    }

    fn find(&self, code: &str) -> Option<&Currency> {
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::seeded()
    }
}

impl CurrencyServiceTrait for CurrencyService {
    fn get_all_currencies(&self) -> Vec<Currency> {
        info!("Getting all currencies");
        self.currencies.clone()
    }

    fn get_active_currencies(&self) -> Vec<Currency> {
        info!("Getting active currencies");
        self.currencies.iter().filter(|c| c.active).cloned().collect()
    }

    fn get_currency_by_code(&self, code: &str) -> Result<Currency> {
        info!("Getting currency with code: {}", code);
        self.find(code)
            .cloned()
            .ok_or_else(|| Error::CurrencyNotFound(code.to_string()))
    }

    fn get_currencies_by_country(&self, country: &str) -> Vec<Currency> {
        info!("Getting currencies for country: {}", country);
        self.currencies
            .iter()
            .filter(|c| c.country.eq_ignore_ascii_case(country))
            .cloned()
            .collect()
    }
}

impl NameResolver for CurrencyService {
    fn resolve_name(&self, code: &str) -> std::result::Result<String, ResolveError> {
        match self.find(code) {
            Some(currency) => Ok(currency.name.clone()),
            None => {
                debug!("No catalog entry for {}", code);
                Err(Box::new(Error::CurrencyNotFound(code.to_string())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eurofx_market_data::resolve_or_code;

    fn catalog() -> CurrencyService {
        let mut service = CurrencyService::seeded();
        service
            .currencies
            .push(Currency::new("DEM", "Deutsche Mark", "Germany", false));
        service
    }

    #[test]
    fn test_all_and_active() {
        let service = catalog();
        assert_eq!(service.get_all_currencies().len(), 6);

        let active = service.get_active_currencies();
        assert_eq!(active.len(), 5);
        assert!(active.iter().all(|c| c.code != "DEM"));
    }

    #[test]
    fn test_get_by_code() {
        let service = catalog();
        assert_eq!(service.get_currency_by_code("gbp").unwrap().name, "British Pound");

        let err = service.get_currency_by_code("XYZ").unwrap_err();
        assert!(matches!(err, Error::CurrencyNotFound(ref code) if code == "XYZ"));
        assert_eq!(err.to_string(), "Currency not found with code: XYZ");
    }

    #[test]
    fn test_by_country() {
        let service = catalog();
        let swiss = service.get_currencies_by_country("Switzerland");
        assert_eq!(swiss.len(), 1);
        assert_eq!(swiss[0].code, "CHF");
        assert!(service.get_currencies_by_country("Atlantis").is_empty());
    }

    #[test]
    fn test_name_resolution() {
        let service = catalog();
        assert_eq!(service.resolve_name("JPY").unwrap(), "Japanese Yen");
        assert!(service.resolve_name("SEK").is_err());
        assert_eq!(resolve_or_code(&service, "SEK"), "SEK");
    }
}
