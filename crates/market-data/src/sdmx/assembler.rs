//! Turns one raw upstream body into rate records for one currency.

use super::document::SdmxDocument;
use super::observations::extract_rates;
use super::time_period::TimePeriodIndex;
use crate::errors::MarketDataError;
use crate::models::RateRecord;
use crate::resolver::NameResolver;

/// Decodes `raw` and extracts every valid observation as a [`RateRecord`].
///
/// A body that is not a decodable document is a hard failure
/// ([`MarketDataError::MalformedPayload`]). Problems inside individual
/// observations are never errors; those observations are left out.
pub fn assemble_rates(
    currency_code: &str,
    raw: &str,
    names: &dyn NameResolver,
) -> Result<Vec<RateRecord>, MarketDataError> {
    let document = SdmxDocument::parse(raw).map_err(|e| {
        log::error!("Error parsing exchange rates for {}: {}", currency_code, e);
        e
    })?;
    Ok(assemble_document(currency_code, &document, names))
}

/// Same as [`assemble_rates`] for an already decoded document.
pub fn assemble_document(
    currency_code: &str,
    document: &SdmxDocument,
    names: &dyn NameResolver,
) -> Vec<RateRecord> {
    let periods = TimePeriodIndex::from_document(document);

    let Some(series) = document.series() else {
        log::debug!("No data sets in response for {}", currency_code);
        return Vec::new();
    };

    extract_rates(series, currency_code, &periods, names)
}
