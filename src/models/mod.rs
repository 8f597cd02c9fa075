//! Forecasting models and per-group strategy selection.
//!
//! Two strategies share the common [`Forecaster`] interface: a
//! moving-average fallback for series too short to model, and a seasonal
//! harmonic regression for everything else. Selection is a pure predicate on
//! series length, expressed as the [`ForecastStrategy`] sum type.

pub mod moving_average;
pub mod seasonal;

pub use moving_average::MovingAverage;
pub use seasonal::SeasonalRegression;

use crate::core::{BucketSeries, Forecast, ForecastRecord, GroupKey};
use crate::error::{ForecastError, Result};
use chrono::Duration;

/// Minimum number of buckets required for the seasonal regression model.
pub const SEASONAL_MIN_BUCKETS: usize = 4;

/// Common interface for the forecasting models.
pub trait Forecaster {
    /// Fit the model to a bucket series.
    fn fit(&mut self, series: &BucketSeries) -> Result<()>;

    /// Generate point predictions for the specified number of future buckets.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Generate predictions with confidence intervals.
    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let _ = level;
        self.predict(horizon)
    }

    /// Get the fitted values (in-sample predictions).
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Get the residuals (actual - fitted).
    fn residuals(&self) -> Option<&[f64]>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}

/// Which model handles a series, decided purely by its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastStrategy {
    /// Fewer than [`SEASONAL_MIN_BUCKETS`] buckets: project the mean forward.
    MovingAverage,
    /// Enough buckets to fit trend and seasonal components.
    SeasonalRegression,
}

impl ForecastStrategy {
    /// Select the strategy for a series of the given length.
    pub fn select(series_len: usize) -> Self {
        if series_len < SEASONAL_MIN_BUCKETS {
            ForecastStrategy::MovingAverage
        } else {
            ForecastStrategy::SeasonalRegression
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ForecastStrategy::MovingAverage => "MovingAverage",
            ForecastStrategy::SeasonalRegression => "SeasonalRegression",
        }
    }
}

/// Number of future buckets to forecast: `max(1, floor(horizon / width))`.
///
/// When the chosen width exceeds the horizon this collapses to exactly one
/// bucket regardless of how large the horizon is; that clamping is the
/// reference behavior and is kept as-is.
pub fn future_periods(horizon_secs: i64, width_secs: i64) -> usize {
    ((horizon_secs / width_secs).max(1)) as usize
}

/// Run the selected model for one group and emit its forecast records.
///
/// Record timestamps start one bucket after the last aggregated bucket,
/// spaced by the series' width. Predictions are clamped to zero and rounded,
/// since counts are non-negative integers. Any model error is reported as a
/// per-group fit failure carrying the group key.
pub fn forecast_group(
    key: &GroupKey,
    series: &BucketSeries,
    horizon_secs: i64,
) -> Result<Vec<ForecastRecord>> {
    let width = series.width_secs();
    let periods = future_periods(horizon_secs, width);
    let strategy = ForecastStrategy::select(series.len());
    tracing::debug!(
        group = %key,
        strategy = strategy.name(),
        buckets = series.len(),
        periods,
        "forecasting group"
    );

    let forecast = run_strategy(strategy, series, horizon_secs, periods)
        .map_err(|e| ForecastError::FitFailed {
            key: key.clone(),
            reason: e.to_string(),
        })?;

    let last = series.last_start();
    let records = forecast
        .point()
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let timestamp = last + Duration::seconds(width * (i as i64 + 1));
            let count = value.round().max(0.0) as u32;
            ForecastRecord::new(key.pattern.clone(), key.class, timestamp, count)
        })
        .collect();
    Ok(records)
}

fn run_strategy(
    strategy: ForecastStrategy,
    series: &BucketSeries,
    horizon_secs: i64,
    periods: usize,
) -> Result<Forecast> {
    match strategy {
        ForecastStrategy::MovingAverage => {
            let mut model = MovingAverage::new();
            model.fit(series)?;
            model.predict(periods)
        }
        ForecastStrategy::SeasonalRegression => {
            let mut model = SeasonalRegression::for_horizon(series.width_secs(), horizon_secs);
            model.fit(series)?;
            model.predict(periods)
        }
    }
}
