//! Timestamp parsing and display formatting for `lastUpdated` values.

use chrono::{DateTime, NaiveDate, Utc};

/// Parse a catalog timestamp.
///
/// Accepts RFC 3339 (`2024-03-01T12:00:00Z`) or a bare calendar date
/// (`2024-03-01`, taken as midnight UTC). Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Locale-independent short form: `MM/DD/YYYY`.
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%m/%d/%Y").to_string()
}

/// Long English form: `January 5, 2024`.
pub fn format_date_long(ts: &DateTime<Utc>) -> String {
    ts.format("%B %-d, %Y").to_string()
}
