use thiserror::Error;

use crate::volume_profile::VolumeProfileValidationError;

/// Failures while turning a CSV source into a volume profile.
/// Any of these aborts the whole load; no partial profile is produced.
#[derive(Error, Debug)]
pub enum VolumeProfileLoadingError {
    #[error("Cannot read, {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Problem while reading, {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Problem while reading, {path}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("Invalid record found,{0}")]
    InvalidRecord(String),
    #[error("Invalid start time in line, {0}")]
    InvalidStartTime(String),
    #[error("Invalid end time in line, {0}")]
    InvalidEndTime(String),
    #[error("Start time is before or same as end time in line, {0}")]
    StartNotBeforeEnd(String),
    #[error("Invalid percentOfDayVolume in line, {0}")]
    InvalidPercent(String),
    #[error("Invalid Bucket Type in line, {0}")]
    InvalidBucketType(String),
    #[error(transparent)]
    Validation(#[from] VolumeProfileValidationError),
}
