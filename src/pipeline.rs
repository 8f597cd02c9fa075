//! Pipeline Orchestrator: grouping → aggregation → forecasting → assembly.
//!
//! Each group's aggregation and forecast step is isolated: a model failure
//! is folded into a failure list and logged, never escalated, so one
//! degenerate group cannot abort the rest of a run.

use crate::aggregate::aggregate;
use crate::assemble::{assemble, ResultTable};
use crate::core::{Event, ForecastRecord, GroupKey, RawCountSeries};
use crate::error::{ForecastError, Result};
use crate::grouping::group_events;
use crate::models::forecast_group;
use std::collections::BTreeMap;
use tracing::warn;

/// Forecast every group, folding per-group outcomes into successes and
/// failures. Failures carry the group key and reason; they are logged and
/// returned for inspection but never abort processing.
pub fn forecast_groups(
    groups: &BTreeMap<GroupKey, RawCountSeries>,
    horizon_secs: i64,
) -> (Vec<ForecastRecord>, Vec<ForecastError>) {
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for (key, raw) in groups {
        let outcome = aggregate(raw, horizon_secs)
            .and_then(|series| forecast_group(key, &series, horizon_secs));
        match outcome {
            Ok(group_records) => records.extend(group_records),
            Err(error) => {
                warn!(group = %key, %error, "skipping group after forecast failure");
                failures.push(error);
            }
        }
    }

    (records, failures)
}

/// Run the full forecasting pipeline.
///
/// Events with unrecognized vehicle classes are dropped; the remaining
/// events are partitioned into independent (turning pattern, class) series,
/// each aggregated and forecast over `horizon_secs`, and the per-group
/// records pivoted into the wide result table.
///
/// # Errors
/// - [`ForecastError::InvalidHorizon`] if `horizon_secs` is not positive.
/// - [`ForecastError::EmptyInput`] if no events were supplied.
/// - [`ForecastError::NoForecasts`] if no group produced any records
///   (everything filtered out, or every group failed to fit).
pub fn run(events: &[Event], horizon_secs: i64) -> Result<ResultTable> {
    if horizon_secs <= 0 {
        return Err(ForecastError::InvalidHorizon(horizon_secs));
    }
    if events.is_empty() {
        return Err(ForecastError::EmptyInput);
    }

    let groups = group_events(events);
    let (records, failures) = forecast_groups(&groups, horizon_secs);
    if !failures.is_empty() {
        warn!(
            failed = failures.len(),
            total = groups.len(),
            "some groups produced no forecasts"
        );
    }

    assemble(records)
}
