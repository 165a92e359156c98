use tracing::debug;

use crate::volume_profile::structs::{Bucket, BucketType, TimestampMS, VolumeProfile};

/// Which side of a query window a time is resolving.
///
/// A time lying exactly on the boundary between two adjacent buckets belongs
/// to the later bucket when it opens a window and to the earlier bucket when
/// it closes one, so windows that tile a day never count a bucket twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryMatch {
    /// Window start: match `start <= time < end`
    Earliest,
    /// Window end: match `start < time <= end`
    Latest,
}

/// Share of `bucket`'s volume falling in `remaining_duration` milliseconds,
/// assuming a uniform trading rate across the bucket.
pub fn calculate_remaining_percent_of_day_volume(remaining_duration: i64, bucket: &Bucket) -> f64 {
    let total_duration = bucket.duration_ms();
    (remaining_duration as f64 / total_duration as f64) * bucket.percent_of_day_volume()
}

impl VolumeProfile {
    /// Index of the bucket covering `time` under the given boundary convention.
    /// Non-overlap guarantees at most one match, so a linear scan is enough.
    pub fn bucket_index_of(&self, time: TimestampMS, boundary: BoundaryMatch) -> Option<usize> {
        self.buckets().iter().position(|bucket| match boundary {
            BoundaryMatch::Earliest => bucket.start_time() <= time && time < bucket.end_time(),
            BoundaryMatch::Latest => bucket.start_time() < time && time <= bucket.end_time(),
        })
    }

    /// Sub-profile holding the volume expected within `[start_time, end_time)`.
    ///
    /// Continuous buckets cut by the window are prorated, auction buckets are
    /// always returned whole. If either end of the window lands outside every
    /// bucket (before, after or in a gap) the result is empty, even when
    /// buckets exist between the two times.
    pub fn cumulative_volume_profile(&self, start_time: TimestampMS, end_time: TimestampMS) -> VolumeProfile {
        if start_time >= end_time {
            return VolumeProfile::empty(self.symbol());
        }

        let start_index = self.bucket_index_of(start_time, BoundaryMatch::Earliest);
        let end_index = self.bucket_index_of(end_time, BoundaryMatch::Latest);
        let (Some(start_index), Some(end_index)) = (start_index, end_index) else {
            debug!(
                symbol = %self.symbol(),
                start_time,
                end_time,
                ?start_index,
                ?end_index,
                "Query window boundary not covered by any bucket"
            );
            return VolumeProfile::empty(self.symbol());
        };

        let buckets = if start_index == end_index {
            vec![slice_single_bucket(&self.buckets()[start_index], start_time, end_time)]
        } else {
            slice_bucket_range(&self.buckets()[start_index..=end_index], start_time, end_time)
        };

        debug!(
            symbol = %self.symbol(),
            start_time,
            end_time,
            start_index,
            end_index,
            bucket_count = buckets.len(),
            "Built cumulative volume profile"
        );

        VolumeProfile::from_ordered(self.symbol(), buckets)
    }

    /// Percent of day volume expected to trade within `[start_time, end_time)`
    pub fn target_percent_for_time_period(&self, start_time: TimestampMS, end_time: TimestampMS) -> f64 {
        self.cumulative_volume_profile(start_time, end_time).total_percent()
    }
}

fn slice_single_bucket(bucket: &Bucket, start_time: TimestampMS, end_time: TimestampMS) -> Bucket {
    match bucket.bucket_type() {
        BucketType::Auction => *bucket,
        BucketType::Continuous => Bucket::derived(
            start_time,
            end_time,
            calculate_remaining_percent_of_day_volume(end_time - start_time, bucket),
            BucketType::Continuous,
        ),
    }
}

// `range` has at least two buckets: the first holds start_time, the last holds end_time.
fn slice_bucket_range(range: &[Bucket], start_time: TimestampMS, end_time: TimestampMS) -> Vec<Bucket> {
    let mut result = Vec::with_capacity(range.len());
    let Some((first, rest)) = range.split_first() else {
        return result;
    };

    if first.bucket_type() == BucketType::Continuous && first.start_time() < start_time {
        result.push(Bucket::derived(
            start_time,
            first.end_time(),
            calculate_remaining_percent_of_day_volume(first.end_time() - start_time, first),
            BucketType::Continuous,
        ));
    } else {
        result.push(*first);
    }

    let Some((last, middle)) = rest.split_last() else {
        return result;
    };
    result.extend_from_slice(middle);

    if last.bucket_type() == BucketType::Continuous && last.end_time() > end_time {
        result.push(Bucket::derived(
            last.start_time(),
            end_time,
            calculate_remaining_percent_of_day_volume(end_time - last.start_time(), last),
            BucketType::Continuous,
        ));
    } else {
        result.push(*last);
    }

    result
}
