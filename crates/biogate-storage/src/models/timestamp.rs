//! Serde helpers for the `YYYY-MM-DD HH:MM:SS` timestamp format used in
//! every persisted file.

use biogate_core::constants::TIMESTAMP_FORMAT;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
}

/// Format a timestamp the way it is persisted.
#[must_use]
pub fn format(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time truncated to whole seconds.
#[must_use]
pub fn now() -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
