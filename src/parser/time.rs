//! Conversion between position-log date/time text and epoch nanoseconds.
//!
//! Position logs carry `YYYY/MM/DD HH:MM:SS.ffffff` stamps with microsecond
//! resolution. They are read as naive calendar time in the UTC frame, with no
//! timezone adjustment.

use crate::error::{GeotagError, Result};
use chrono::{DateTime, NaiveDateTime, Timelike};

/// Input pattern for position-log timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.f";
/// Output pattern used by [`format_timestamp`]
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f";

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MICRO: i64 = 1_000;

/// Parse a `YYYY/MM/DD HH:MM:SS.ffffff` string into nanoseconds since the epoch.
///
/// The result is `floor(seconds) * 1e9 + microseconds * 1000`. A shorter
/// fraction is right-padded (`.5` is 500000 µs); digits past microseconds are
/// dropped.
pub fn parse_timestamp(text: &str) -> Result<i64> {
    let text = text.trim();
    let has_fraction = text
        .rsplit_once('.')
        .is_some_and(|(_, fraction)| fraction.starts_with(|c: char| c.is_ascii_digit()));
    if !has_fraction {
        return Err(GeotagError::Parse(format!(
            "invalid timestamp '{text}': missing fractional seconds"
        )));
    }
    let datetime = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map_err(|e| GeotagError::Parse(format!("invalid timestamp '{text}': {e}")))?;
    datetime_to_nanos(&datetime)
        .ok_or_else(|| GeotagError::Parse(format!("timestamp '{text}' is out of range")))
}

/// Nanoseconds since the epoch for a naive datetime, truncated to microseconds
pub fn datetime_to_nanos(datetime: &NaiveDateTime) -> Option<i64> {
    let seconds = datetime.and_utc().timestamp();
    let micros = i64::from(datetime.nanosecond()) / NANOS_PER_MICRO;
    seconds
        .checked_mul(NANOS_PER_SECOND)?
        .checked_add(micros * NANOS_PER_MICRO)
}

/// Render epoch nanoseconds back into the position-log layout.
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn format_timestamp(timestamp_ns: i64) -> Option<String> {
    let seconds = timestamp_ns.div_euclid(NANOS_PER_SECOND);
    let nanos = timestamp_ns.rem_euclid(NANOS_PER_SECOND) as u32;
    let datetime = DateTime::from_timestamp(seconds, nanos)?;
    Some(
        datetime
            .naive_utc()
            .format(TIMESTAMP_DISPLAY_FORMAT)
            .to_string(),
    )
}
