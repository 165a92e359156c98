pub mod common;
pub mod config;
pub mod loader;
pub mod logging;
pub mod volume_profile;

pub use loader::{VolumeProfileCsvLoader, VolumeProfileLoadingError};
pub use volume_profile::{Bucket, BucketType, TimestampMS, VolumeProfile, VolumeProfileValidationError};
