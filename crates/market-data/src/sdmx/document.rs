//! SDMX-JSON response document.
//!
//! Only the two read paths the rate pipeline needs are walked:
//! `data.structure.dimensions.observation[]` and `data.dataSets[0].series`.
//! The body is kept as a JSON tree. A missing section, or one of an
//! unexpected type, reads as absent, so it yields no dates or no
//! observations instead of rejecting the document.

use serde_json::{Map, Value};

use crate::errors::MarketDataError;

/// Identifier of the time dimension inside the observation dimensions.
pub const TIME_PERIOD_DIMENSION: &str = "TIME_PERIOD";

const OBSERVATION_DIMENSIONS: &str = "/data/structure/dimensions/observation";
const FIRST_DATA_SET_SERIES: &str = "/data/dataSets/0/series";

/// Root of an SDMX-JSON data message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SdmxDocument {
    root: Value,
}

impl SdmxDocument {
    /// Decodes a raw upstream body.
    ///
    /// Fails with [`MarketDataError::MalformedPayload`] only when the body is
    /// not well-formed JSON.
    pub fn parse(raw: &str) -> Result<Self, MarketDataError> {
        serde_json::from_str(raw)
            .map(Self::from_value)
            .map_err(|e| MarketDataError::MalformedPayload(e.to_string()))
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Values of the `TIME_PERIOD` dimension in document order, if present.
    pub fn time_period_values(&self) -> Option<&[Value]> {
        self.root
            .pointer(OBSERVATION_DIMENSIONS)
            .and_then(Value::as_array)?
            .iter()
            .find(|dimension| {
                dimension.get("id").and_then(Value::as_str) == Some(TIME_PERIOD_DIMENSION)
            })
            .and_then(|dimension| dimension.get("values"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Series of the first data set. Later data sets are not read.
    pub fn series(&self) -> Option<&Map<String, Value>> {
        self.root
            .pointer(FIRST_DATA_SET_SERIES)
            .and_then(Value::as_object)
    }
}
