//! Event Grouper: partitions detection events into independent count series.
//!
//! Events with an unrecognized vehicle class are dropped before any counting,
//! so invalid classes never reach the rest of the pipeline.

use crate::core::{Event, GroupKey, RawCountSeries};
use std::collections::BTreeMap;

/// Partition events into one raw count series per (turning pattern, class).
///
/// Coincident events at identical timestamps are summed into a single
/// observation. The `BTreeMap` keeps group iteration order lexical, so
/// downstream processing is deterministic.
pub fn group_events(events: &[Event]) -> BTreeMap<GroupKey, RawCountSeries> {
    let mut buckets: BTreeMap<GroupKey, BTreeMap<chrono::DateTime<chrono::Utc>, u32>> =
        BTreeMap::new();

    for event in events {
        let Some(class) = crate::core::VehicleClass::parse(&event.vehicle_class) else {
            continue;
        };
        let key = GroupKey::new(event.turning_pattern(), class);
        *buckets
            .entry(key)
            .or_default()
            .entry(event.timestamp)
            .or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(key, by_timestamp)| {
            let (timestamps, counts): (Vec<_>, Vec<_>) = by_timestamp.into_iter().unzip();
            // BTreeMap iteration is strictly increasing, so this cannot fail.
            let series = RawCountSeries::new(timestamps, counts)
                .unwrap_or_else(|_| unreachable!("sorted map yields sorted timestamps"));
            (key, series)
        })
        .collect()
}
