//! Timestamps for `<lastmod>` values.
//!
//! Content timestamps arrive in a few shapes depending on where the snapshot
//! was exported from:
//!
//! | Input                        | Interpreted as              |
//! |------------------------------|-----------------------------|
//! | `2025-01-06T10:30:00+02:00`  | RFC 3339, converted to UTC  |
//! | `2025-01-06 10:30:00`        | wall clock in UTC           |
//! | `2025-01-06`                 | midnight UTC                |
//!
//! Output is always the W3C datetime profile with an explicit `+00:00` offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, de::Error};

/// Point in time attached to content rows and sitemap entries.
pub type Timestamp = DateTime<Utc>;

/// Parse a timestamp in any of the supported input formats.
pub fn parse(s: &str) -> Option<Timestamp> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Format as W3C datetime, e.g. `2025-01-06T00:00:00+00:00`.
pub fn to_w3c(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Latest of all present timestamps, `None` if every input is absent.
pub fn latest<I>(timestamps: I) -> Option<Timestamp>
where
    I: IntoIterator<Item = Option<Timestamp>>,
{
    timestamps.into_iter().flatten().max()
}

/// Serde helper for optional timestamp fields (`null` and missing are `None`).
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {s}"))),
    }
}
