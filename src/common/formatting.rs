use chrono::DateTime;

use crate::common::constants::{PLAIN_DECIMAL_MAX, PLAIN_DECIMAL_MIN, TIME_FORMAT};

/// `HH:mm:ss` rendering of a UTC epoch-millisecond timestamp.
/// Builds a fresh formatter per call.
pub fn format_time(timestamp: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp) {
        Some(dt) => dt.format(TIME_FORMAT).to_string(),
        None => timestamp.to_string(),
    }
}

/// Shortest round-trip decimal, always carrying a fractional digit.
///
/// Magnitudes in `[1e-3, 1e7)` print positionally (`25.0`, `0.581800584825`);
/// anything else uses `d.dddE±n` notation (`2.0E-5`, `1.25E7`).
pub fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}Infinity");
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (PLAIN_DECIMAL_MIN..PLAIN_DECIMAL_MAX).contains(&magnitude) {
        return format!("{value:?}");
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}
