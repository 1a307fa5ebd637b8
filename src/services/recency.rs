// src/services/recency.rs

//! Posting age normalization.
//!
//! Vendors report dates as ISO strings, long-form English dates, Unix seconds
//! or Unix milliseconds. Everything is reduced to milliseconds since the
//! epoch, then to a whole-day age bucket such as `"2d"`.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::models::RawTimestamp;

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Numbers below this are Unix seconds, at or above are milliseconds.
const SECONDS_CUTOFF: f64 = 1e10;

static BUCKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)d$").expect("valid bucket pattern"));

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%#z"];
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y"];

/// Interpret a vendor date as milliseconds since the epoch.
///
/// `None` means the value is not a usable date. It is an expected outcome and
/// callers treat it as "age unknown".
pub fn parse_timestamp(raw: &RawTimestamp) -> Option<i64> {
    match raw {
        RawTimestamp::Number(n) => parse_number(*n),
        RawTimestamp::Text(s) => parse_text(s),
    }
}

fn parse_number(n: f64) -> Option<i64> {
    if !n.is_finite() {
        return None;
    }
    let ms = if n < SECONDS_CUTOFF { n * 1000.0 } else { n };
    Some(ms.floor() as i64)
}

fn parse_text(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.timestamp_millis());
        }
    }
    // No offset: read as UTC
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis());
        }
    }
    None
}

/// Whole days between `millis` and `now`, never negative, as `"<n>d"`.
pub fn bucket_from_millis(millis: i64, now: DateTime<Utc>) -> String {
    let days = now.timestamp_millis().saturating_sub(millis).div_euclid(DAY_MS).max(0);
    format!("{days}d")
}

/// Age bucket for a raw vendor date, `None` when the date is unknown.
pub fn age_bucket(raw: &RawTimestamp, now: DateTime<Utc>) -> Option<String> {
    parse_timestamp(raw).map(|ms| bucket_from_millis(ms, now))
}

/// Whether a posting with this age bucket is recent enough to keep.
///
/// Unknown ages and anything not shaped like `"<n>d"` pass.
pub fn within_window(bucket: Option<&str>, max_days: u32) -> bool {
    let Some(bucket) = bucket else {
        return true;
    };
    let Some(caps) = BUCKET_RE.captures(bucket.trim()) else {
        return true;
    };
    match caps[1].parse::<u64>() {
        Ok(days) => days <= u64::from(max_days),
        // Too many digits for u64: older than any threshold
        Err(_) => false,
    }
}
