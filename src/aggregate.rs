//! Interval Aggregator: resamples a raw count series into fixed-width buckets.
//!
//! Bucket width adapts to data density: dense series get fine buckets (down
//! to [`MIN_BUCKET_SECS`]) so short-term structure stays visible, sparse
//! series get coarse buckets up to the full horizon so at least a few buckets
//! exist for modeling.

use crate::core::{BucketSeries, RawCountSeries};
use crate::error::{ForecastError, Result};

/// Smallest permitted bucket width, in seconds.
pub const MIN_BUCKET_SECS: i64 = 10;

/// Choose the bucket width for a series.
///
/// `w = clamp(round(span / points), MIN_BUCKET_SECS, horizon)`, with the
/// lower bound winning if the horizon is itself below the minimum. A series
/// with no points gets the full horizon as its width.
pub fn bucket_width(span_secs: i64, points: usize, horizon_secs: i64) -> i64 {
    if points == 0 {
        return horizon_secs;
    }
    let average = (span_secs as f64 / points as f64).round() as i64;
    average.min(horizon_secs).max(MIN_BUCKET_SECS)
}

/// Resample a raw series into contiguous buckets of `width_secs`, starting
/// at the first observation. Buckets with no events get count 0; no bucket
/// is skipped.
///
/// Pure arithmetic on epoch offsets; no calendar alignment is involved.
pub fn resample(raw: &RawCountSeries, width_secs: i64) -> Result<BucketSeries> {
    if width_secs <= 0 {
        return Err(ForecastError::InvalidParameter(format!(
            "bucket width must be positive, got {width_secs}"
        )));
    }
    let Some(start) = raw.first_timestamp() else {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    };

    let last_index = (raw.span_secs() / width_secs) as usize;
    let mut counts = vec![0.0; last_index + 1];
    for (timestamp, &count) in raw.timestamps().iter().zip(raw.counts()) {
        let index = ((*timestamp - start).num_seconds() / width_secs) as usize;
        counts[index] += f64::from(count);
    }

    BucketSeries::new(start, width_secs, counts)
}

/// Pick a width for the series and resample it in one step.
pub fn aggregate(raw: &RawCountSeries, horizon_secs: i64) -> Result<BucketSeries> {
    let width = bucket_width(raw.span_secs(), raw.len(), horizon_secs);
    tracing::debug!(width_secs = width, points = raw.len(), "chose bucket width");
    resample(raw, width)
}
