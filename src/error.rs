//! Error types for the movement-forecast pipeline.
//!
//! Per-group model failures (`FitFailed`) are recovered by the orchestrator
//! and never abort a run; only a global absence of forecasts surfaces as
//! `NoForecasts`. The excluded service layer maps `EmptyInput` and
//! `InvalidHorizon` to client errors (400), `NoForecasts` to not-found (404),
//! and everything else to an internal error (500).

use crate::core::GroupKey;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while building movement forecasts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// No events were supplied at all.
    #[error("empty input: no events supplied")]
    EmptyInput,

    /// The requested horizon is not a positive number of seconds.
    #[error("invalid horizon: {0} (must be a positive number of seconds)")]
    InvalidHorizon(i64),

    /// Timestamp ordering or arithmetic problem.
    #[error("timestamp error: {0}")]
    Timestamp(String),

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    Computation(String),

    /// The seasonal model failed to fit or predict for one group.
    /// Recovered per group; the group contributes no forecast records.
    #[error("model fit failed for group {key}: {reason}")]
    FitFailed { key: GroupKey, reason: String },

    /// No group produced any forecast records.
    #[error("no forecasts available")]
    NoForecasts,
}
