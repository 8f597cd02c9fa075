//! Forecast output structures.

use crate::core::{TurningPattern, VehicleClass};
use chrono::{DateTime, Utc};

/// Point predictions for future buckets, with optional interval bounds.
///
/// Interval bounds are carried when the model computes them (the seasonal
/// model is configured with a 95% level), but only the point forecast is
/// surfaced in forecast records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    point: Vec<f64>,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
}

impl Forecast {
    /// Create a forecast from point predictions only.
    pub fn from_values(point: Vec<f64>) -> Self {
        Self {
            point,
            lower: None,
            upper: None,
        }
    }

    /// Create a forecast with prediction intervals.
    pub fn from_values_with_intervals(point: Vec<f64>, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self {
            point,
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    pub fn point(&self) -> &[f64] {
        &self.point
    }

    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }

    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }
}

/// One predicted count for one group at one future bucket.
///
/// Timestamps are strictly after the last aggregated bucket, spaced by the
/// group's bucket width. Counts are non-negative integers by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRecord {
    pub pattern: TurningPattern,
    pub class: VehicleClass,
    pub timestamp: DateTime<Utc>,
    pub predicted_count: u32,
}

impl ForecastRecord {
    pub fn new(
        pattern: TurningPattern,
        class: VehicleClass,
        timestamp: DateTime<Utc>,
        predicted_count: u32,
    ) -> Self {
        Self {
            pattern,
            class,
            timestamp,
            predicted_count,
        }
    }
}
