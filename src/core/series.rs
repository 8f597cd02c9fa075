//! Count series structures: raw per-timestamp counts and regular bucket series.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Utc};

/// Per-timestamp event counts for one group, ordered by time.
///
/// Coincident events are pre-summed, so timestamps are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCountSeries {
    timestamps: Vec<DateTime<Utc>>,
    counts: Vec<u32>,
}

impl RawCountSeries {
    /// Create a raw series. Timestamps must be strictly increasing and
    /// aligned one-to-one with counts.
    pub fn new(timestamps: Vec<DateTime<Utc>>, counts: Vec<u32>) -> Result<Self> {
        if timestamps.len() != counts.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "timestamps ({}) and counts ({}) must have equal length",
                timestamps.len(),
                counts.len()
            )));
        }
        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(ForecastError::Timestamp(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }
        Ok(Self { timestamps, counts })
    }

    /// Number of distinct observation timestamps.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamps.first().copied()
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamps.last().copied()
    }

    /// Elapsed seconds between the first and last observation (0 for a
    /// single-point series).
    pub fn span_secs(&self) -> i64 {
        match (self.first_timestamp(), self.last_timestamp()) {
            (Some(first), Some(last)) => (last - first).num_seconds(),
            _ => 0,
        }
    }

    /// Total number of underlying events.
    pub fn total_count(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }
}

/// A contiguous, zero-filled sequence of fixed-width count buckets.
///
/// Bucket `i` covers `[start + i*width, start + (i+1)*width)`. Counts are
/// stored as `f64` because they feed straight into model fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSeries {
    start: DateTime<Utc>,
    width_secs: i64,
    counts: Vec<f64>,
}

impl BucketSeries {
    pub fn new(start: DateTime<Utc>, width_secs: i64, counts: Vec<f64>) -> Result<Self> {
        if width_secs <= 0 {
            return Err(ForecastError::InvalidParameter(format!(
                "bucket width must be positive, got {width_secs}"
            )));
        }
        Ok(Self {
            start,
            width_secs,
            counts,
        })
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn width_secs(&self) -> i64 {
        self.width_secs
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Start of bucket `i`.
    pub fn bucket_start(&self, i: usize) -> DateTime<Utc> {
        self.start + Duration::seconds(self.width_secs * i as i64)
    }

    /// Start of the last bucket (the series start if there are no buckets).
    pub fn last_start(&self) -> DateTime<Utc> {
        self.bucket_start(self.counts.len().saturating_sub(1))
    }

    /// Sum of all bucket counts.
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// True when every bucket holds the same count. A constant series gives
    /// the seasonal model nothing to decompose.
    pub fn is_constant(&self) -> bool {
        self.counts
            .windows(2)
            .all(|pair| (pair[0] - pair[1]).abs() < f64::EPSILON)
    }
}
