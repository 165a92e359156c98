#![allow(dead_code)]

use chrono::NaiveDate;
use intraday_volume::loader::utils::parse_date_time;
use intraday_volume::{Bucket, BucketType, TimestampMS, VolumeProfile, VolumeProfileCsvLoader};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

pub const EPSILON: f64 = 0.000001;
pub const TEST_SYMBOL: &str = "TEST_SYMBOL";
pub const HK_SYMBOL: &str = "9988_HK";

/// Timestamp for a `dd/MM/yyyy HH:mm:ss` string
pub fn time(value: &str) -> TimestampMS {
    parse_date_time(value).unwrap_or_else(|| panic!("bad fixture time: {value}"))
}

/// Timestamp for `HH:mm:ss` on 24/08/2025
pub fn at(hms: &str) -> TimestampMS {
    time(&format!("24/08/2025 {hms}"))
}

pub fn trading_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 24).unwrap()
}

pub fn bucket(start: &str, end: &str, percent: f64, bucket_type: BucketType) -> Bucket {
    Bucket::new(at(start), at(end), percent, bucket_type).unwrap()
}

/// Six one-minute buckets from 09:00 with auctions at 09:00 and 09:03.
/// Percentages total 160 on purpose; slicing never requires a complete day.
pub fn six_bucket_profile() -> VolumeProfile {
    VolumeProfile::new(
        TEST_SYMBOL,
        vec![
            bucket("09:00:00", "09:01:00", 25.0, BucketType::Auction),
            bucket("09:01:00", "09:02:00", 25.0, BucketType::Continuous),
            bucket("09:02:00", "09:03:00", 20.0, BucketType::Continuous),
            bucket("09:03:00", "09:04:00", 30.0, BucketType::Auction),
            bucket("09:04:00", "09:05:00", 30.0, BucketType::Continuous),
            bucket("09:05:00", "09:06:00", 30.0, BucketType::Continuous),
        ],
    )
    .unwrap()
}

pub fn hk_profile_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/9988_HK.csv")
}

pub fn hk_loader() -> VolumeProfileCsvLoader {
    VolumeProfileCsvLoader::new().with_trading_date(trading_date())
}

pub fn load_hk_profile() -> VolumeProfile {
    hk_loader()
        .load_volume_profile(HK_SYMBOL, hk_profile_path())
        .expect("fixture profile should load")
}

/// Write `contents` to a temporary CSV file that lives as long as the handle
pub fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp csv");
    file.write_all(contents.as_bytes()).expect("write temp csv");
    file.flush().expect("flush temp csv");
    file
}
