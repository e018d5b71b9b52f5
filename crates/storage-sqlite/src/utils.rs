//! Shared conversion helpers between stored text columns and domain types.
//!
//! Instants are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};
use verdant_core::errors::Error;

use crate::errors::StorageError;

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            StorageError::SerializationError(format!("invalid timestamp '{raw}': {e}")).into()
        })
}

pub fn parse_timestamp_opt(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, Error> {
    raw.map(parse_timestamp).transpose()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
        StorageError::SerializationError(format!("invalid date '{raw}': {e}")).into()
    })
}

pub fn parse_date_opt(raw: Option<&str>) -> Result<Option<NaiveDate>, Error> {
    raw.map(parse_date).transpose()
}

pub fn parse_string_set(raw: &str) -> Result<std::collections::BTreeSet<String>, Error> {
    serde_json::from_str(raw).map_err(|e| {
        StorageError::SerializationError(format!("invalid string set: {e}")).into()
    })
}

pub fn parse_string_vec(raw: &str) -> Result<Vec<String>, Error> {
    serde_json::from_str(raw).map_err(|e| {
        StorageError::SerializationError(format!("invalid string list: {e}")).into()
    })
}

pub fn to_json_string<T: serde::Serialize>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value)
        .map_err(|e| StorageError::SerializationError(e.to_string()).into())
}
