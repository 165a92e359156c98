use crate::common::constants::{EPSILON, FULL_DAY_PERCENT};
use crate::volume_profile::errors::VolumeProfileValidationError;
use crate::volume_profile::structs::{Bucket, TimestampMS};

/// Two percentages are equal when they differ by less than [`EPSILON`]
pub fn equal_double(value1: f64, value2: f64) -> bool {
    (value1 - value2).abs() < EPSILON
}

/// Single-bucket invariants: non-empty span and a non-negative percentage.
/// NaN percentages are rejected with the negative-percent error.
pub fn validate_bucket(bucket: &Bucket) -> Result<(), VolumeProfileValidationError> {
    if bucket.start_time() >= bucket.end_time() {
        return Err(VolumeProfileValidationError::InvalidTimeRange(bucket.to_string()));
    }
    if !(bucket.percent_of_day_volume() >= 0.0) {
        return Err(VolumeProfileValidationError::NegativePercent(bucket.to_string()));
    }
    Ok(())
}

/// Profile invariants over buckets in insertion order.
///
/// Adjacent buckets may share a boundary and gaps are allowed; a bucket that
/// starts before the previous one ended is an overlap. The 100% total is
/// only enforced when `complete_day_profile` is set.
pub fn validate_profile(
    buckets: &[Bucket],
    complete_day_profile: bool,
) -> Result<(), VolumeProfileValidationError> {
    let mut total_percent = 0.0;
    let mut previous_end_time: TimestampMS = 0;

    for bucket in buckets {
        if bucket.start_time() < previous_end_time {
            return Err(VolumeProfileValidationError::Overlap(bucket.to_string()));
        }
        total_percent += bucket.percent_of_day_volume();
        previous_end_time = bucket.end_time();
    }

    if complete_day_profile && !equal_double(total_percent, FULL_DAY_PERCENT) {
        return Err(VolumeProfileValidationError::Incomplete(total_percent));
    }

    Ok(())
}
