//! Position -> date index over the `TIME_PERIOD` dimension.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::document::SdmxDocument;

/// Length of a full `YYYY-MM-DD` period identifier.
const DAY_PERIOD_LEN: usize = 10;

/// Length of a `YYYY-MM` period identifier.
const MONTH_PERIOD_LEN: usize = 7;

/// Ordered mapping from observation position to calendar date.
///
/// Built once per document. Positions whose identifier did not parse are
/// absent, so observations pointing at them are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimePeriodIndex {
    dates: BTreeMap<usize, NaiveDate>,
}

impl TimePeriodIndex {
    /// Builds the index from the document's `TIME_PERIOD` dimension.
    ///
    /// A missing dimension yields an empty index.
    pub fn from_document(document: &SdmxDocument) -> Self {
        let Some(values) = document.time_period_values() else {
            log::debug!("No TIME_PERIOD dimension in document");
            return Self::default();
        };

        let dates = values
            .iter()
            .enumerate()
            .filter_map(|(position, value)| {
                value
                    .get("id")
                    .and_then(serde_json::Value::as_str)
                    .and_then(parse_period)
                    .map(|date| (position, date))
            })
            .collect();

        Self { dates }
    }

    pub fn get(&self, position: usize) -> Option<NaiveDate> {
        self.dates.get(&position).copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, NaiveDate)> + '_ {
        self.dates.iter().map(|(position, date)| (*position, *date))
    }
}

/// Parses a period identifier.
///
/// Accepts `YYYY-MM-DD`, and `YYYY-MM` read as the first day of that month.
/// Anything else is `None`.
pub fn parse_period(id: &str) -> Option<NaiveDate> {
    match id.len() {
        DAY_PERIOD_LEN => NaiveDate::parse_from_str(id, "%Y-%m-%d").ok(),
        MONTH_PERIOD_LEN => NaiveDate::parse_from_str(&format!("{}-01", id), "%Y-%m-%d").ok(),
        _ => None,
    }
}
