// file: src/normalizer/dates.rs
// description: tolerant date parsing for epoch and calendar-string values
// reference: https://docs.rs/chrono

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref ISO_DATE: Regex =
        Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("ISO_DATE regex is valid");
    static ref US_DATE: Regex =
        Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("US_DATE regex is valid");
}

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a raw date value into a calendar date.
///
/// JSON numbers are interpreted as epoch milliseconds; strings attempt a
/// fixed set of calendar formats. Anything unparseable is absent, never an
/// error.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(number) => {
            let millis = number.as_i64().or_else(|| number.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
        }
        Value::String(text) => parse_date_str(text.trim()),
        _ => None,
    }
}

fn parse_date_str(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }

    if let Ok(stamped) = DateTime::parse_from_rfc3339(text) {
        return Some(stamped.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(stamped) = NaiveDateTime::parse_from_str(text, format) {
            return Some(stamped.date());
        }
    }

    if let Some(parts) = ISO_DATE.captures(text) {
        return date_from_captures(&parts, 1, 2, 3);
    }

    if let Some(parts) = US_DATE.captures(text) {
        return date_from_captures(&parts, 3, 1, 2);
    }

    None
}

fn date_from_captures(
    parts: &regex::Captures<'_>,
    year_idx: usize,
    month_idx: usize,
    day_idx: usize,
) -> Option<NaiveDate> {
    let year: i32 = parts.get(year_idx)?.as_str().parse().ok()?;
    let month: u32 = parts.get(month_idx)?.as_str().parse().ok()?;
    let day: u32 = parts.get(day_idx)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
