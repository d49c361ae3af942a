//! Observation walk over SDMX series.
//!
//! Every per-observation problem (bad index, missing value, sentinel text,
//! non-numeric value, unmapped position) drops that observation and moves on.
//! Nothing in this module returns an error.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::time_period::TimePeriodIndex;
use crate::models::RateRecord;
use crate::resolver::{resolve_or_code, NameResolver};

/// Textual values that mean "no observation".
const SENTINELS: &[&str] = &["null", "nan", "n/a"];

/// Why an observation was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Skip {
    BadIndex(String),
    NoValue,
    Sentinel,
    NotNumeric(String),
    NoDate(usize),
}

/// Walks every series and every observation, emitting one record per valid
/// observation. Series are concatenated in document order.
pub fn extract_rates(
    series: &Map<String, Value>,
    currency_code: &str,
    periods: &TimePeriodIndex,
    names: &dyn NameResolver,
) -> Vec<RateRecord> {
    let mut rates = Vec::new();

    for (series_key, body) in series {
        let Some(observations) = body.get("observations").and_then(Value::as_object) else {
            log::debug!("Series '{}' has no observations", series_key);
            continue;
        };
        rates.extend(extract_observations(
            observations,
            currency_code,
            periods,
            names,
        ));
    }

    rates
}

/// Extracts records from one series' observation map.
pub fn extract_observations(
    observations: &Map<String, Value>,
    currency_code: &str,
    periods: &TimePeriodIndex,
    names: &dyn NameResolver,
) -> Vec<RateRecord> {
    observations
        .iter()
        .filter_map(|(key, value)| match read_observation(key, value, periods) {
            Ok((date, rate)) => Some(RateRecord::new(
                currency_code,
                resolve_or_code(names, currency_code),
                date,
                rate,
            )),
            Err(Skip::NotNumeric(text)) => {
                log::warn!(
                    "Skipping non-numeric value: {} for currency: {}",
                    text,
                    currency_code
                );
                None
            }
            Err(skip) => {
                log::debug!(
                    "Skipping observation '{}' for {}: {:?}",
                    key,
                    currency_code,
                    skip
                );
                None
            }
        })
        .collect()
}

fn read_observation(
    key: &str,
    value: &Value,
    periods: &TimePeriodIndex,
) -> Result<(chrono::NaiveDate, Decimal), Skip> {
    let position: usize = key
        .parse()
        .map_err(|_| Skip::BadIndex(key.to_string()))?;

    let first = value
        .as_array()
        .and_then(|values| values.first())
        .ok_or(Skip::NoValue)?;

    let text = observation_text(first).ok_or(Skip::Sentinel)?;
    let rate = parse_rate(&text).ok_or(Skip::NotNumeric(text))?;
    let date = periods.get(position).ok_or(Skip::NoDate(position))?;

    Ok((date, rate))
}

/// Textual form of an observation value, or `None` for null, sentinel and
/// blank values.
pub fn observation_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };

    if text.is_empty() || SENTINELS.iter().any(|s| text.eq_ignore_ascii_case(s)) {
        return None;
    }
    Some(text)
}

/// Parses decimal text, accepting plain and scientific notation.
///
/// Only digits, signs, the decimal point and an exponent marker are allowed,
/// so digit separators such as `1_25` are rejected.
pub fn parse_rate(text: &str) -> Option<Decimal> {
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
