//! Moving-average fallback model.
//!
//! Used when a series is too short for seasonal modeling: projects the mean
//! of all bucket counts forward unchanged. Deterministic, no fitting step
//! that can fail.

use crate::core::{BucketSeries, Forecast};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::mean;

/// Forecasts every future bucket as the historical mean.
#[derive(Debug, Clone, Default)]
pub struct MovingAverage {
    mean: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl MovingAverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fitted mean, if the model has been fitted.
    pub fn mean(&self) -> Option<f64> {
        self.mean
    }
}

impl Forecaster for MovingAverage {
    fn fit(&mut self, series: &BucketSeries) -> Result<()> {
        let values = series.counts();

        // An empty series falls back to a zero mean rather than an error;
        // this model is the strategy of last resort.
        let avg = if values.is_empty() { 0.0 } else { mean(values) };
        self.mean = Some(avg);

        self.fitted = Some(vec![avg; values.len()]);
        self.residuals = Some(values.iter().map(|v| v - avg).collect());
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let mean = self.mean.ok_or(ForecastError::FitRequired)?;
        Ok(Forecast::from_values(vec![mean; horizon]))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "MovingAverage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn series(counts: Vec<f64>) -> BucketSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        BucketSeries::new(start, 10, counts).unwrap()
    }

    #[test]
    fn predicts_the_historical_mean() {
        let mut model = MovingAverage::new();
        model.fit(&series(vec![2.0, 4.0, 6.0])).unwrap();

        let forecast = model.predict(5).unwrap();
        assert_eq!(forecast.horizon(), 5);
        for &value in forecast.point() {
            assert_relative_eq!(value, 4.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn empty_series_predicts_zero() {
        let mut model = MovingAverage::new();
        model.fit(&series(vec![])).unwrap();
        assert_eq!(model.mean(), Some(0.0));

        let forecast = model.predict(3).unwrap();
        assert_eq!(forecast.point(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn predict_before_fit_is_an_error() {
        let model = MovingAverage::new();
        assert_eq!(model.predict(1).unwrap_err(), ForecastError::FitRequired);
        assert!(!model.is_fitted());
    }

    #[test]
    fn residuals_center_on_zero() {
        let mut model = MovingAverage::new();
        model.fit(&series(vec![1.0, 3.0])).unwrap();

        let residuals = model.residuals().unwrap();
        assert_relative_eq!(residuals.iter().sum::<f64>(), 0.0, epsilon = 1e-10);
        assert_eq!(model.fitted_values().unwrap(), &[2.0, 2.0]);
    }

    #[test]
    fn fitted_mean_matches_the_shared_helper() {
        let counts = vec![2.0, 5.0, 11.0];
        let mut model = MovingAverage::new();
        model.fit(&series(counts.clone())).unwrap();
        assert_eq!(model.mean(), Some(mean(&counts)));
    }

    #[test]
    fn interval_requests_fall_back_to_point_forecasts() {
        // Only the seasonal model carries interval configuration; the
        // fallback serves the trait's default point-only behavior.
        let mut model = MovingAverage::new();
        model.fit(&series(vec![1.0, 2.0, 3.0])).unwrap();

        let forecast = model.predict_with_intervals(2, 0.95).unwrap();
        assert!(!forecast.has_intervals());
        assert_eq!(forecast.point(), model.predict(2).unwrap().point());
    }

    #[test]
    fn zero_horizon_gives_empty_forecast() {
        let mut model = MovingAverage::new();
        model.fit(&series(vec![1.0])).unwrap();
        assert!(model.predict(0).unwrap().is_empty());
    }
}
