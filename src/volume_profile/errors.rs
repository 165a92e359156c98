use thiserror::Error;

use crate::common::formatting::format_decimal;

/// Structural problems with a bucket or a volume profile.
///
/// Messages carry the rendered bucket (or computed total) so that a rejected
/// profile can be diagnosed from the log line alone.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VolumeProfileValidationError {
    #[error("Start time cannot be equal or later than end time, {0}")]
    InvalidTimeRange(String),
    #[error("Percent of day volume cannot be less than 0, {0}")]
    NegativePercent(String),
    #[error("Overlapping buckets found in Volume Profile,{0}")]
    Overlap(String),
    #[error("Total percentages in all buckets do not total to 100.0,{}", format_decimal(*.0))]
    Incomplete(f64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown bucket type: {0}")]
pub struct ParseBucketTypeError(pub String);
