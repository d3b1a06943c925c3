//! Date normalization for registry timestamps.
//!
//! Flat-style registries report ISO 8601 values (`1995-08-14T04:00:00Z`),
//! outline-style registries report `14-Feb-1999`. Each grammar uses exactly
//! one of these entry points and neither ever fails loudly: an unparseable
//! value is simply `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Normalized timestamp stored on a [`crate::Record`].
pub type Timestamp = DateTime<Utc>;

/// Parses an ISO 8601 date or datetime.
///
/// Offsets are converted to UTC, naive datetimes are taken as UTC and
/// bare dates become midnight UTC.
pub fn parse_iso8601(value: &str) -> Option<Timestamp> {
    let cleaned = value.trim();
    if cleaned.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(cleaned) {
        return Some(dt.with_timezone(&Utc));
    }

    // Offsets without a colon, e.g. `1997-09-15T07:00:00+0000`
    let offset_formats = [
        "%Y-%m-%dT%H:%M:%S%z",
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S%z",
    ];
    for fmt in &offset_formats {
        if let Ok(dt) = DateTime::parse_from_str(cleaned, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    // Some registries omit the offset or use a space instead of `T`
    let naive_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in &naive_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cleaned.trim_end_matches('Z'), fmt) {
            return Some(dt.and_utc());
        }
    }

    if let Some(dt) = NaiveDate::parse_from_str(cleaned, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Some(dt.and_utc());
    }

    cleaned.parse::<DateTime<Utc>>().ok()
}

/// Parses a `D-Mon-YYYY` date such as `14-Feb-1999`.
pub fn parse_day_month_year(value: &str) -> Option<Timestamp> {
    let date = NaiveDate::parse_from_str(value.trim(), "%d-%b-%Y").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}
