use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use chrono::{NaiveDate, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use crate::common::constants::{CSV_COMMENT_PREFIX, CSV_DELIMITER, CSV_FIELD_COUNT, CSV_FIELD_SEPARATOR};
use crate::common::error_utils::ErrorContext;
use crate::loader::errors::VolumeProfileLoadingError;
use crate::loader::utils::{parse_bucket_type, parse_percent, parse_time_field};
use crate::volume_profile::{Bucket, VolumeProfile};

/// Loads a volume profile from comma separated lines of
/// `startTime,endTime,percentOfDayVolume,bucketType`.
///
/// Lines starting with `#` are comments. Every other line, blank ones included,
/// must hold a bucket. Times are either `HH:mm:ss`, placed on the loader's
/// trading date, or `dd/MM/yyyy HH:mm:ss`; both are UTC.
#[derive(Debug, Clone)]
pub struct VolumeProfileCsvLoader {
    trading_date: NaiveDate,
    complete_day: bool,
}

impl Default for VolumeProfileCsvLoader {
    fn default() -> Self {
        Self {
            trading_date: Utc::now().date_naive(),
            complete_day: true,
        }
    }
}

impl VolumeProfileCsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Date that time-only fields are anchored to
    pub fn with_trading_date(mut self, trading_date: NaiveDate) -> Self {
        self.trading_date = trading_date;
        self
    }

    /// Whether the loaded percentages must total 100.0 (default: true)
    pub fn with_complete_day(mut self, complete_day: bool) -> Self {
        self.complete_day = complete_day;
        self
    }

    pub fn trading_date(&self) -> NaiveDate {
        self.trading_date
    }

    pub fn load_volume_profile<P: AsRef<Path>>(
        &self,
        symbol: &str,
        path: P,
    ) -> Result<VolumeProfile, VolumeProfileLoadingError> {
        let source_name = path.as_ref().display().to_string();
        let file = File::open(path.as_ref()).with_read_context(&source_name)?;
        self.read_profile(symbol, file, &source_name)
    }

    pub fn load_from_reader<R: Read>(
        &self,
        symbol: &str,
        reader: R,
    ) -> Result<VolumeProfile, VolumeProfileLoadingError> {
        self.read_profile(symbol, reader, symbol)
    }

    fn read_profile<R: Read>(
        &self,
        symbol: &str,
        reader: R,
        source_name: &str,
    ) -> Result<VolumeProfile, VolumeProfileLoadingError> {
        let mut buckets = Vec::new();
        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.with_read_context(source_name)?;
            if line.starts_with(CSV_COMMENT_PREFIX) {
                continue;
            }
            let bucket = self.bucket_from_line(&line, source_name).inspect_err(|e| {
                warn!(symbol, source = source_name, line = index + 1, error = %e, "Rejected volume profile source");
            })?;
            buckets.push(bucket);
        }

        let profile = if self.complete_day {
            VolumeProfile::new_complete_day(symbol, buckets)
        } else {
            VolumeProfile::new(symbol, buckets)
        }
        .inspect_err(|e| {
            warn!(symbol, source = source_name, error = %e, "Loaded buckets do not form a valid profile");
        })?;

        info!(
            symbol,
            source = source_name,
            bucket_count = profile.len(),
            total_percent = profile.total_percent(),
            "📊 Volume profile loaded"
        );
        Ok(profile)
    }

    /// The csv reader yields no record for an empty line, which is rejected here.
    fn bucket_from_line(&self, line: &str, source_name: &str) -> Result<Bucket, VolumeProfileLoadingError> {
        let mut record = StringRecord::new();
        let found = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(CSV_DELIMITER)
            .trim(Trim::All)
            .from_reader(line.as_bytes())
            .read_record(&mut record)
            .with_read_context(source_name)?;
        if !found {
            return Err(VolumeProfileLoadingError::InvalidRecord(line.to_string()));
        }
        self.bucket_from_record(&record)
    }

    fn bucket_from_record(&self, record: &StringRecord) -> Result<Bucket, VolumeProfileLoadingError> {
        let line = record.iter().collect::<Vec<_>>().join(CSV_FIELD_SEPARATOR);
        if record.len() < CSV_FIELD_COUNT {
            return Err(VolumeProfileLoadingError::InvalidRecord(line));
        }

        let Some(start_time) = parse_time_field(field(record, 0), self.trading_date) else {
            return Err(VolumeProfileLoadingError::InvalidStartTime(line));
        };
        let Some(end_time) = parse_time_field(field(record, 1), self.trading_date) else {
            return Err(VolumeProfileLoadingError::InvalidEndTime(line));
        };
        if start_time >= end_time {
            return Err(VolumeProfileLoadingError::StartNotBeforeEnd(line));
        }
        let percent_of_day_volume = match parse_percent(field(record, 2)) {
            Some(percent) if percent >= 0.0 => percent,
            _ => return Err(VolumeProfileLoadingError::InvalidPercent(line)),
        };
        let Some(bucket_type) = parse_bucket_type(field(record, 3)) else {
            return Err(VolumeProfileLoadingError::InvalidBucketType(line));
        };

        Ok(Bucket::new(start_time, end_time, percent_of_day_volume, bucket_type)?)
    }
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}
