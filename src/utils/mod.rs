//! Numeric utilities shared by the forecasting models.

pub mod ols;
pub mod stats;

pub use ols::{ols_fit, OlsFit};
pub use stats::{mean, quantile_normal, rms};
