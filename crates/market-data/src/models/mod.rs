//! Data models for upstream rate retrieval.

mod query;
mod rate;

pub use query::{
    build_key, format_date, Period, SeriesQuery, DEFAULT_DATAFLOW_ID, DEFAULT_FORMAT,
    DEFAULT_LANGUAGE,
};
pub use rate::RateRecord;
