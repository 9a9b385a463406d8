//! Publication date parsing
//!
//! Providers disagree on date formats: HeadHunter sends ISO-8601 with a
//! colon-less offset (`2024-03-01T10:15:00+0300`), SuperJob sends epoch
//! seconds, and re-imported canonical records carry RFC 3339 strings. Every
//! failure degrades to `None`; nothing here returns an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Offset-aware formats, tried after RFC 3339
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z", // 2024-03-01T10:15:00+0300
    "%Y-%m-%d %H:%M:%S%.f%z", // 2024-03-01 10:15:00+03:00
];

/// Naive formats, interpreted as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f", // 2024-03-01T10:15:00
    "%Y-%m-%d %H:%M:%S",    // 2024-03-01 10:15:00
];

/// Parse a JSON value of unknown shape into an instant
///
/// Numbers are epoch seconds; strings go through [`parse_datetime_str`].
pub fn parse_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Null => None,
        Value::Number(number) => {
            let seconds = number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f.trunc() as i64));
            let parsed = seconds.and_then(from_epoch);
            if parsed.is_none() {
                tracing::warn!(value = %number, "Epoch timestamp out of range");
            }
            parsed
        }
        Value::String(text) => parse_datetime_str(text),
        other => {
            tracing::warn!(value = %other, "Unsupported date value");
            None
        }
    }
}

/// Parse a date string of unknown format into an instant
///
/// Order: epoch seconds, RFC 3339, ISO-8601 with offset, ISO-8601 without
/// offset, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD`. First success wins.
///
/// # Examples
///
/// ```
/// use rabota::parser::datetime::parse_datetime_str;
///
/// let dt = parse_datetime_str("2024-03-01T10:15:00+0300").unwrap();
/// assert_eq!(dt.to_rfc3339(), "2024-03-01T07:15:00+00:00");
/// assert!(parse_datetime_str("").is_none());
/// ```
pub fn parse_datetime_str(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(parsed) = parse_epoch_str(trimmed) {
        return Some(parsed);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    tracing::warn!(value = trimmed, "Unrecognized date format");
    None
}

fn parse_epoch_str(text: &str) -> Option<DateTime<Utc>> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let seconds = text
        .parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().map(|f| f.trunc() as i64))?;
    from_epoch(seconds)
}

fn from_epoch(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}
