//! Core data model: events, group keys, count series, and forecast records.

pub mod event;
pub mod forecast;
pub mod series;

pub use event::{Event, GroupKey, TurningPattern, VehicleClass};
pub use forecast::{Forecast, ForecastRecord};
pub use series::{BucketSeries, RawCountSeries};
