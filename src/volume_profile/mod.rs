/// Volume Profile Module
///
/// Intraday volume distribution as a sequence of disjoint time buckets, and
/// the window slicing used by execution schedules to compute target
/// participation as the session progresses.
pub mod calculator;
pub mod errors;
pub mod structs;
pub mod validation;

pub use calculator::{calculate_remaining_percent_of_day_volume, BoundaryMatch};
pub use errors::{ParseBucketTypeError, VolumeProfileValidationError};
pub use structs::{Bucket, BucketType, TimestampMS, VolumeProfile};
pub use validation::equal_double;
