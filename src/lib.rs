//! # movement-forecast
//!
//! Short-horizon forecasting of vehicle counts at intersection turning
//! movements, broken down by vehicle class, from a log of timestamped
//! detection events.
//!
//! The pipeline partitions events into independent (turning pattern,
//! vehicle class) series, resamples each into density-adaptive count
//! buckets, forecasts each series with either a moving-average fallback or
//! a seasonal harmonic regression depending on data volume, and pivots the
//! per-group predictions into a wide table with one column per vehicle
//! class.
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use movement_forecast::prelude::*;
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
//! let events: Vec<Event> = (0..3)
//!     .map(|i| Event::new(start + Duration::seconds(i * 25), "North", "East", "Car"))
//!     .collect();
//!
//! let table = run(&events, 300).unwrap();
//! assert!(!table.is_empty());
//! ```

pub mod aggregate;
pub mod assemble;
pub mod core;
pub mod error;
pub mod grouping;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use error::{ForecastError, Result};
pub use pipeline::run;

pub mod prelude {
    pub use crate::assemble::{ResultRow, ResultTable};
    pub use crate::core::{Event, ForecastRecord, GroupKey, TurningPattern, VehicleClass};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{Forecaster, ForecastStrategy};
    pub use crate::pipeline::run;
}
