use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::common::constants::{DATE_TIME_FORMAT, TIME_FORMAT};
use crate::volume_profile::{BucketType, TimestampMS};

pub fn string_not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn parse_bucket_type(value: &str) -> Option<BucketType> {
    if !string_not_empty(value) {
        return None;
    }
    value.parse().ok()
}

/// Finite decimal percentage; sign is left for the caller to judge
pub fn parse_percent(value: &str) -> Option<f64> {
    if !string_not_empty(value) {
        return None;
    }
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `dd/MM/yyyy HH:mm:ss`, interpreted as UTC
pub fn parse_date_time(value: &str) -> Option<TimestampMS> {
    if !string_not_empty(value) {
        return None;
    }
    NaiveDateTime::parse_from_str(value.trim(), DATE_TIME_FORMAT)
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// `HH:mm:ss` on `trading_date`, interpreted as UTC
pub fn parse_time_of_day(value: &str, trading_date: NaiveDate) -> Option<TimestampMS> {
    if !string_not_empty(value) {
        return None;
    }
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .ok()
        .map(|time| trading_date.and_time(time).and_utc().timestamp_millis())
}

/// A CSV time column: time of day anchored to `trading_date`, or a full date-time
pub fn parse_time_field(value: &str, trading_date: NaiveDate) -> Option<TimestampMS> {
    parse_time_of_day(value, trading_date).or_else(|| parse_date_time(value))
}
