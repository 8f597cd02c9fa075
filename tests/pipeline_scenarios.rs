//! End-to-end pipeline scenarios.
//!
//! Each test drives the full pipeline through `run` with synthetic event
//! logs and checks the externally visible result table.

use chrono::{DateTime, Duration, TimeZone, Utc};
use movement_forecast::aggregate::bucket_width;
use movement_forecast::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
}

fn at(secs: i64) -> DateTime<Utc> {
    base() + Duration::seconds(secs)
}

fn events(start: &str, end: &str, class: &str, offsets: &[i64]) -> Vec<Event> {
    offsets
        .iter()
        .map(|&s| Event::new(at(s), start, end, class))
        .collect()
}

/// Three events inside a minute with a 300s horizon: too few buckets for
/// the seasonal model, so the moving-average fallback projects the mean.
#[test]
fn sparse_group_uses_the_mean_projection() {
    // Offsets 0/25/50 resample to three one-count buckets (width 17).
    let input = events("A", "B", "Car", &[0, 25, 50]);
    let table = run(&input, 300).unwrap();

    assert!(table.len() >= 1);
    for row in table.rows() {
        assert_eq!(row.turning_pattern, "AB");
        assert!(row.timestamp > at(50));
        // Mean of [1, 1, 1] rounds to 1; every other class column is 0.
        assert_eq!(row.count(VehicleClass::Car), 1);
        for class in [
            VehicleClass::Bicycle,
            VehicleClass::TwoWheeler,
            VehicleClass::Truck,
            VehicleClass::Bus,
        ] {
            assert_eq!(row.count(class), 0);
        }
    }
}

/// A dense day of events with an 1800s horizon goes through the seasonal
/// model and yields exactly floor(horizon / width) future rows.
#[test]
fn dense_group_uses_the_seasonal_model() {
    // 1000 events spread over ~24h, with a repeating 2/1/0 bucket pattern
    // so the series is not constant.
    let offsets: Vec<i64> = (0..1000)
        .map(|i| i * 86 + if i % 3 == 0 { 5 } else { 0 })
        .collect();
    let input = events("A", "B", "Car", &offsets);
    let table = run(&input, 1800).unwrap();

    let span = offsets[999] - offsets[0];
    let width = bucket_width(span, 1000, 1800);
    let expected_rows = (1800 / width).max(1) as usize;
    assert_eq!(table.len(), expected_rows);

    let last_event = at(offsets[999]);
    for row in table.rows() {
        assert!(row.timestamp > last_event);
    }
}

/// Input containing only an invalid class is filtered to nothing, which is
/// a no-results condition rather than an empty table.
#[test]
fn invalid_classes_only_yield_no_forecasts() {
    let input = events("A", "B", "Motorcycle", &[0, 30, 60]);
    assert_eq!(run(&input, 300).unwrap_err(), ForecastError::NoForecasts);
}

/// One group is engineered to fail the seasonal fit (constant series); the
/// other group's rows still appear, with zeros in the failed group's column.
#[test]
fn failed_group_leaves_zeros_in_its_column() {
    // Car: evenly spaced events become a constant bucket series of length
    // >= 4, which the seasonal model rejects as unidentifiable.
    let mut input = events("A", "B", "Car", &[0, 20, 40, 60, 80, 100, 120, 140]);
    // Bus: three events fall back to the moving average and succeed.
    input.extend(events("A", "B", "Bus", &[0, 25, 50]));

    let table = run(&input, 300).unwrap();
    assert!(!table.is_empty());
    for row in table.rows() {
        assert_eq!(row.count(VehicleClass::Car), 0);
        assert_eq!(row.count(VehicleClass::Bus), 1);
    }
}

/// The table always carries the two key columns plus exactly the five fixed
/// class columns, whatever classes the input contained.
#[test]
fn table_always_has_the_five_class_columns() {
    let input = events("A", "B", "Truck", &[0, 25, 50]);
    let table = run(&input, 300).unwrap();

    let json = serde_json::to_value(&table).unwrap();
    let row = json.as_array().unwrap()[0].as_object().unwrap();
    let mut keys: Vec<&str> = row.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "Bicycle",
            "Bus",
            "Car",
            "Timestamp",
            "Truck",
            "Turning Pattern",
            "Two Wheeler"
        ]
    );
}

/// Two runs over identical input and horizon give identical tables.
#[test]
fn pipeline_is_idempotent() {
    let mut input = events("N", "E", "Car", &(0..40).map(|i| i * 37).collect::<Vec<_>>());
    input.extend(events("N", "E", "Bus", &[0, 100, 200]));
    input.extend(events("S", "W", "Two Wheeler", &[10, 60, 110, 400, 650]));

    let first = run(&input, 900).unwrap();
    let second = run(&input, 900).unwrap();
    assert_eq!(first, second);
}

/// Multiple patterns stay independent: each pattern's rows only carry its
/// own predictions, ordered by pattern then timestamp.
#[test]
fn patterns_are_forecast_independently() {
    let mut input = events("N", "E", "Car", &[0, 25, 50]);
    input.extend(events("S", "W", "Bus", &[5, 30, 55]));

    let table = run(&input, 300).unwrap();
    assert!(table.rows_for_pattern("NE").count() >= 1);
    assert!(table.rows_for_pattern("SW").count() >= 1);

    for row in table.rows_for_pattern("NE") {
        assert_eq!(row.count(VehicleClass::Bus), 0);
    }
    for row in table.rows_for_pattern("SW") {
        assert_eq!(row.count(VehicleClass::Car), 0);
    }

    // Sorted by pattern, then timestamp.
    let patterns: Vec<&str> = table
        .rows()
        .iter()
        .map(|r| r.turning_pattern.as_str())
        .collect();
    let mut sorted = patterns.clone();
    sorted.sort_unstable();
    assert_eq!(patterns, sorted);
}
