use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::formatting::{format_decimal, format_time};
use crate::volume_profile::errors::{ParseBucketTypeError, VolumeProfileValidationError};
use crate::volume_profile::validation;

pub type TimestampMS = i64;

/// How volume inside a bucket may be apportioned to a narrower window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BucketType {
    /// Indivisible event (opening/closing auction); never split
    Auction,
    /// Uniform-rate trading; divisible proportionally by elapsed time
    Continuous,
}

impl fmt::Display for BucketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketType::Auction => write!(f, "Auction"),
            BucketType::Continuous => write!(f, "Continuous"),
        }
    }
}

impl FromStr for BucketType {
    type Err = ParseBucketTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Auction" => Ok(BucketType::Auction),
            "Continuous" => Ok(BucketType::Continuous),
            other => Err(ParseBucketTypeError(other.to_string())),
        }
    }
}

/// A time span `[start_time, end_time)` with its share of the day's volume.
///
/// Fields are private: the only ways to obtain a `Bucket` are [`Bucket::new`]
/// and deserialization, both of which validate, so every live instance holds
/// `start_time < end_time` and a non-negative percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BucketRecord")]
pub struct Bucket {
    start_time: TimestampMS,
    end_time: TimestampMS,
    percent_of_day_volume: f64,
    bucket_type: BucketType,
}

/// Unvalidated wire form of a bucket
#[derive(Debug, Clone, Deserialize)]
struct BucketRecord {
    start_time: TimestampMS,
    end_time: TimestampMS,
    percent_of_day_volume: f64,
    bucket_type: BucketType,
}

impl TryFrom<BucketRecord> for Bucket {
    type Error = VolumeProfileValidationError;

    fn try_from(record: BucketRecord) -> Result<Self, Self::Error> {
        Bucket::new(
            record.start_time,
            record.end_time,
            record.percent_of_day_volume,
            record.bucket_type,
        )
    }
}

impl Bucket {
    pub fn new(
        start_time: TimestampMS,
        end_time: TimestampMS,
        percent_of_day_volume: f64,
        bucket_type: BucketType,
    ) -> Result<Self, VolumeProfileValidationError> {
        let bucket = Self {
            start_time,
            end_time,
            percent_of_day_volume,
            bucket_type,
        };
        bucket.validate()?;
        Ok(bucket)
    }

    /// Build a bucket the slicing code has already proven valid.
    pub(crate) fn derived(
        start_time: TimestampMS,
        end_time: TimestampMS,
        percent_of_day_volume: f64,
        bucket_type: BucketType,
    ) -> Self {
        let bucket = Self {
            start_time,
            end_time,
            percent_of_day_volume,
            bucket_type,
        };
        debug_assert!(bucket.validate().is_ok(), "derived bucket is invalid: {bucket}");
        bucket
    }

    /// Re-check the bucket invariants
    pub fn validate(&self) -> Result<(), VolumeProfileValidationError> {
        validation::validate_bucket(self)
    }

    pub fn start_time(&self) -> TimestampMS {
        self.start_time
    }

    pub fn end_time(&self) -> TimestampMS {
        self.end_time
    }

    pub fn percent_of_day_volume(&self) -> f64 {
        self.percent_of_day_volume
    }

    pub fn bucket_type(&self) -> BucketType {
        self.bucket_type
    }

    pub fn is_auction(&self) -> bool {
        self.bucket_type == BucketType::Auction
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// True when `time` falls inside `[start_time, end_time)`
    pub fn contains(&self, time: TimestampMS) -> bool {
        self.start_time <= time && time < self.end_time
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bucket{{startTime={}, endTime={}, percentOfDayVolume={}, bucketType={}}}",
            format_time(self.start_time),
            format_time(self.end_time),
            format_decimal(self.percent_of_day_volume),
            self.bucket_type
        )
    }
}

/// Ordered, non-overlapping buckets describing one symbol's intraday volume
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeProfile {
    symbol: String,
    buckets: Vec<Bucket>,
}

impl VolumeProfile {
    /// Build a profile, enforcing only the non-overlap rule.
    /// Buckets must already be in chronological order; they are not sorted.
    pub fn new(symbol: impl Into<String>, buckets: Vec<Bucket>) -> Result<Self, VolumeProfileValidationError> {
        let profile = Self {
            symbol: symbol.into(),
            buckets,
        };
        profile.validate(false)?;
        Ok(profile)
    }

    /// Build a profile whose percentages must also total 100.0
    pub fn new_complete_day(
        symbol: impl Into<String>,
        buckets: Vec<Bucket>,
    ) -> Result<Self, VolumeProfileValidationError> {
        let profile = Self {
            symbol: symbol.into(),
            buckets,
        };
        profile.validate(true)?;
        Ok(profile)
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            buckets: Vec::new(),
        }
    }

    /// Assemble a profile from buckets already known to be ordered and disjoint
    pub(crate) fn from_ordered(symbol: &str, buckets: Vec<Bucket>) -> Self {
        let profile = Self {
            symbol: symbol.to_string(),
            buckets,
        };
        debug_assert!(profile.validate(false).is_ok());
        profile
    }

    /// Check non-overlap and, for a complete day, that percentages total 100.0
    pub fn validate(&self, complete_day_profile: bool) -> Result<(), VolumeProfileValidationError> {
        validation::validate_profile(&self.buckets, complete_day_profile)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_percent(&self) -> f64 {
        self.buckets.iter().map(Bucket::percent_of_day_volume).sum()
    }

    pub fn first_start_time(&self) -> Option<TimestampMS> {
        self.buckets.first().map(Bucket::start_time)
    }

    pub fn last_end_time(&self) -> Option<TimestampMS> {
        self.buckets.last().map(Bucket::end_time)
    }

    /// Header line followed by one bracketed bucket per line
    pub fn to_multi_line_string(&self) -> String {
        let mut out = format!("VolumeProfile:{}\n", self.symbol);
        for bucket in &self.buckets {
            out.push('[');
            out.push_str(&bucket.to_string());
            out.push_str("]\n");
        }
        out
    }
}

impl fmt::Display for VolumeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VolumeProfile{{symbol='{}', buckets=[", self.symbol)?;
        for (i, bucket) in self.buckets.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{bucket}")?;
        }
        write!(f, "]}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: TimestampMS = 1756025143766; // 2025-08-24 08:45:43.766 UTC

    #[test]
    fn test_bucket_creation() {
        let bucket = Bucket::new(1, 2, 2.045, BucketType::Auction).unwrap();
        assert_eq!(bucket.start_time(), 1);
        assert_eq!(bucket.end_time(), 2);
        assert!((bucket.percent_of_day_volume() - 2.045).abs() < 0.000001);
        assert_eq!(bucket.bucket_type(), BucketType::Auction);
        assert_eq!(bucket.duration_ms(), 1);
    }

    #[test]
    fn test_bucket_creation_rejects_empty_and_inverted_spans() {
        let err = Bucket::new(NOW, NOW, 1.0, BucketType::Auction).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Start time cannot be equal or later than end time, Bucket{startTime=08:45:43, endTime=08:45:43, percentOfDayVolume=1.0, bucketType=Auction}"
        );

        let err = Bucket::new(NOW + 100_000, NOW, 1.0, BucketType::Auction).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Start time cannot be equal or later than end time, Bucket{startTime=08:47:23, endTime=08:45:43, percentOfDayVolume=1.0, bucketType=Auction}"
        );
    }

    #[test]
    fn test_bucket_creation_rejects_negative_percent() {
        let err = Bucket::new(NOW, NOW + 60_000, -1.0, BucketType::Auction).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Percent of day volume cannot be less than 0, Bucket{startTime=08:45:43, endTime=08:46:43, percentOfDayVolume=-1.0, bucketType=Auction}"
        );
        assert!(matches!(
            Bucket::new(NOW, NOW + 60_000, f64::NAN, BucketType::Continuous),
            Err(VolumeProfileValidationError::NegativePercent(_))
        ));
    }

    #[test]
    fn test_bucket_display_small_and_large_percentages() {
        let small = Bucket::new(NOW, NOW + 60_000, 0.00002, BucketType::Continuous).unwrap();
        assert_eq!(
            small.to_string(),
            "Bucket{startTime=08:45:43, endTime=08:46:43, percentOfDayVolume=2.0E-5, bucketType=Continuous}"
        );
        let large = Bucket::new(NOW, NOW + 60_000, 12_500_000.0, BucketType::Auction).unwrap();
        assert_eq!(
            large.to_string(),
            "Bucket{startTime=08:45:43, endTime=08:46:43, percentOfDayVolume=1.25E7, bucketType=Auction}"
        );
    }

    #[test]
    fn test_bucket_copy_keeps_fields() {
        let bucket = Bucket::new(NOW, NOW + 60_000, 3.5, BucketType::Continuous).unwrap();
        let copy = bucket;
        assert_eq!(copy, bucket);
        assert!(copy.validate().is_ok());
    }

    #[test]
    fn test_bucket_contains_is_half_open() {
        let bucket = Bucket::new(1_000, 2_000, 1.0, BucketType::Continuous).unwrap();
        assert!(bucket.contains(1_000));
        assert!(bucket.contains(1_999));
        assert!(!bucket.contains(2_000));
        assert!(!bucket.contains(999));
    }

    #[test]
    fn test_bucket_type_parsing() {
        assert_eq!("Auction".parse::<BucketType>().unwrap(), BucketType::Auction);
        assert_eq!(" Continuous ".parse::<BucketType>().unwrap(), BucketType::Continuous);
        assert_eq!(
            "AUC".parse::<BucketType>().unwrap_err(),
            ParseBucketTypeError("AUC".to_string())
        );
        assert!("auction".parse::<BucketType>().is_err());
    }

    #[test]
    fn test_bucket_deserialization_validates() {
        let ok: Bucket = serde_json::from_str(
            r#"{"start_time":0,"end_time":60000,"percent_of_day_volume":1.5,"bucket_type":"Continuous"}"#,
        )
        .unwrap();
        assert_eq!(ok.duration_ms(), 60_000);

        let bad = serde_json::from_str::<Bucket>(
            r#"{"start_time":60000,"end_time":0,"percent_of_day_volume":1.5,"bucket_type":"Auction"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_profile_rendering() {
        let profile = VolumeProfile::new(
            "TEST_SYMBOL",
            vec![
                Bucket::new(0, 60_000, 25.0, BucketType::Auction).unwrap(),
                Bucket::new(60_000, 120_000, 12.5, BucketType::Continuous).unwrap(),
            ],
        )
        .unwrap();

        assert_eq!(
            profile.to_multi_line_string(),
            "VolumeProfile:TEST_SYMBOL\n\
             [Bucket{startTime=00:00:00, endTime=00:01:00, percentOfDayVolume=25.0, bucketType=Auction}]\n\
             [Bucket{startTime=00:01:00, endTime=00:02:00, percentOfDayVolume=12.5, bucketType=Continuous}]\n"
        );
        assert_eq!(
            profile.to_string(),
            "VolumeProfile{symbol='TEST_SYMBOL', buckets=[Bucket{startTime=00:00:00, endTime=00:01:00, percentOfDayVolume=25.0, bucketType=Auction}, Bucket{startTime=00:01:00, endTime=00:02:00, percentOfDayVolume=12.5, bucketType=Continuous}]}"
        );
        assert_eq!(VolumeProfile::empty("X").to_multi_line_string(), "VolumeProfile:X\n");
    }

    #[test]
    fn test_profile_accessors() {
        let profile = VolumeProfile::new(
            "ABC",
            vec![
                Bucket::new(0, 10, 40.0, BucketType::Auction).unwrap(),
                Bucket::new(20, 30, 60.0, BucketType::Continuous).unwrap(),
            ],
        )
        .unwrap();
        assert_eq!(profile.symbol(), "ABC");
        assert_eq!(profile.len(), 2);
        assert!(!profile.is_empty());
        assert_eq!(profile.first_start_time(), Some(0));
        assert_eq!(profile.last_end_time(), Some(30));
        assert!((profile.total_percent() - 100.0).abs() < 1e-9);
        assert!(VolumeProfile::empty("ABC").first_start_time().is_none());
    }
}
