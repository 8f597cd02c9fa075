//! Seasonal regression model: additive trend plus harmonic components.
//!
//! Decomposes a bucket series into a linear trend and Fourier seasonal
//! terms, fitted jointly by least squares. The daily component is always
//! present; an extra hourly component (period 3600s, 5 harmonics) is added
//! for sub-hour horizons, where intra-hour cycles are too fine for the
//! daily terms to resolve. The trend is a single global line: no abrupt
//! changepoints are assumed.

use crate::core::{BucketSeries, Forecast};
use crate::error::{ForecastError, Result};
use crate::models::{Forecaster, SEASONAL_MIN_BUCKETS};
use crate::utils::{ols_fit, quantile_normal, rms, OlsFit};
use std::f64::consts::TAU;

/// Period of the daily seasonal component, in seconds.
pub const DAILY_PERIOD_SECS: f64 = 86_400.0;
/// Period of the optional intra-hour component, in seconds.
pub const HOURLY_PERIOD_SECS: f64 = 3_600.0;
/// Number of daily Fourier harmonics.
pub const DAILY_HARMONICS: usize = 4;
/// Number of intra-hour Fourier harmonics.
pub const HOURLY_HARMONICS: usize = 5;
/// Confidence level for prediction intervals. Configuration metadata: only
/// the point forecast is surfaced in the pipeline output.
pub const DEFAULT_INTERVAL_LEVEL: f64 = 0.95;

/// Harmonic regression forecaster for one bucket series.
#[derive(Debug, Clone)]
pub struct SeasonalRegression {
    width_secs: i64,
    hourly: bool,
    level: f64,
    coef: Option<OlsFit>,
    n_obs: usize,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    sigma: f64,
}

impl SeasonalRegression {
    /// Create a model with daily seasonality only.
    pub fn new(width_secs: i64) -> Self {
        Self {
            width_secs,
            hourly: false,
            level: DEFAULT_INTERVAL_LEVEL,
            coef: None,
            n_obs: 0,
            fitted: None,
            residuals: None,
            sigma: 0.0,
        }
    }

    /// Create a model configured for the requested horizon: sub-hour
    /// horizons get the extra intra-hour seasonal component.
    pub fn for_horizon(width_secs: i64, horizon_secs: i64) -> Self {
        let mut model = Self::new(width_secs);
        model.hourly = horizon_secs <= HOURLY_PERIOD_SECS as i64;
        model
    }

    /// Enable or disable the intra-hour component explicitly.
    pub fn with_hourly_component(mut self, enabled: bool) -> Self {
        self.hourly = enabled;
        self
    }

    /// Whether the intra-hour component is active.
    pub fn has_hourly_component(&self) -> bool {
        self.hourly
    }

    /// Build design columns for the given time offsets (seconds since the
    /// first bucket): trend first, then sin/cos pairs per harmonic.
    fn design_columns(&self, offsets: &[f64]) -> Vec<Vec<f64>> {
        let mut columns = Vec::new();

        // Trend in days keeps the column on the same scale as the harmonics.
        columns.push(offsets.iter().map(|t| t / DAILY_PERIOD_SECS).collect());

        for k in 1..=DAILY_HARMONICS {
            let omega = TAU * k as f64 / DAILY_PERIOD_SECS;
            columns.push(offsets.iter().map(|t| (omega * t).sin()).collect());
            columns.push(offsets.iter().map(|t| (omega * t).cos()).collect());
        }

        if self.hourly {
            for k in 1..=HOURLY_HARMONICS {
                let omega = TAU * k as f64 / HOURLY_PERIOD_SECS;
                columns.push(offsets.iter().map(|t| (omega * t).sin()).collect());
                columns.push(offsets.iter().map(|t| (omega * t).cos()).collect());
            }
        }

        columns
    }

    fn offsets(&self, indices: impl Iterator<Item = usize>) -> Vec<f64> {
        indices.map(|i| (i as i64 * self.width_secs) as f64).collect()
    }
}

impl Forecaster for SeasonalRegression {
    fn fit(&mut self, series: &BucketSeries) -> Result<()> {
        let n = series.len();
        if n < SEASONAL_MIN_BUCKETS {
            return Err(ForecastError::InsufficientData {
                needed: SEASONAL_MIN_BUCKETS,
                got: n,
            });
        }
        // A constant series leaves trend and seasonal terms unidentifiable.
        if series.is_constant() {
            return Err(ForecastError::Computation(
                "constant series: seasonal decomposition is unidentifiable".to_string(),
            ));
        }

        let y = series.counts();
        let offsets = self.offsets(0..n);
        let columns = self.design_columns(&offsets);

        let coef = ols_fit(y, &columns)?;
        let fitted = coef.predict(&columns)?;
        let residuals: Vec<f64> = y.iter().zip(&fitted).map(|(a, f)| a - f).collect();
        self.sigma = rms(&residuals);

        self.coef = Some(coef);
        self.n_obs = n;
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let coef = self.coef.as_ref().ok_or(ForecastError::FitRequired)?;
        if horizon == 0 {
            return Ok(Forecast::default());
        }

        // Only the newly appended buckets, one width past the last fitted one.
        let offsets = self.offsets(self.n_obs..self.n_obs + horizon);
        let columns = self.design_columns(&offsets);
        let point = coef.predict(&columns)?;

        let z = quantile_normal((1.0 + self.level) / 2.0);
        let lower = point.iter().map(|p| p - z * self.sigma).collect();
        let upper = point.iter().map(|p| p + z * self.sigma).collect();
        Ok(Forecast::from_values_with_intervals(point, lower, upper))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "SeasonalRegression"
    }
}
