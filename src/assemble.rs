//! Result Assembler: pivots per-group forecast records into the wide table.
//!
//! One row per (turning pattern, future timestamp), one column per vehicle
//! class in the fixed order Bicycle, Car, Two Wheeler, Truck, Bus. Missing
//! cells are zero-filled, so every row always carries all five classes, and
//! rows are ordered by (pattern, timestamp) independent of the order in
//! which groups were forecast.

use crate::core::{ForecastRecord, TurningPattern, VehicleClass};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// One output row. Serializes with the external column names, so the
/// excluded service layer can emit the table as a list of row objects as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    #[serde(rename = "Turning Pattern")]
    pub turning_pattern: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "Bicycle")]
    pub bicycle: u32,
    #[serde(rename = "Car")]
    pub car: u32,
    #[serde(rename = "Two Wheeler")]
    pub two_wheeler: u32,
    #[serde(rename = "Truck")]
    pub truck: u32,
    #[serde(rename = "Bus")]
    pub bus: u32,
}

impl ResultRow {
    fn new(turning_pattern: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            turning_pattern,
            timestamp,
            bicycle: 0,
            car: 0,
            two_wheeler: 0,
            truck: 0,
            bus: 0,
        }
    }

    /// Predicted count for a class in this row.
    pub fn count(&self, class: VehicleClass) -> u32 {
        match class {
            VehicleClass::Bicycle => self.bicycle,
            VehicleClass::Car => self.car,
            VehicleClass::TwoWheeler => self.two_wheeler,
            VehicleClass::Truck => self.truck,
            VehicleClass::Bus => self.bus,
        }
    }

    fn count_mut(&mut self, class: VehicleClass) -> &mut u32 {
        match class {
            VehicleClass::Bicycle => &mut self.bicycle,
            VehicleClass::Car => &mut self.car,
            VehicleClass::TwoWheeler => &mut self.two_wheeler,
            VehicleClass::Truck => &mut self.truck,
            VehicleClass::Bus => &mut self.bus,
        }
    }
}

/// The terminal, externally visible artifact of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows for one turning pattern, in timestamp order.
    pub fn rows_for_pattern<'a>(
        &'a self,
        pattern: &'a str,
    ) -> impl Iterator<Item = &'a ResultRow> {
        self.rows.iter().filter(move |r| r.turning_pattern == pattern)
    }
}

/// Pivot forecast records into the wide result table.
///
/// Counts landing in the same cell are summed; duplicates only occur if a
/// caller hands in overlapping record sets. An empty record set means no
/// group produced forecasts, which is a user-visible no-results condition
/// rather than an empty table.
pub fn assemble(records: Vec<ForecastRecord>) -> Result<ResultTable> {
    if records.is_empty() {
        return Err(ForecastError::NoForecasts);
    }

    // BTreeMap keys give the stable (pattern, timestamp) row order.
    let mut cells: BTreeMap<(TurningPattern, DateTime<Utc>), ResultRow> = BTreeMap::new();
    for record in records {
        let row = cells
            .entry((record.pattern.clone(), record.timestamp))
            .or_insert_with(|| ResultRow::new(record.pattern.as_str().to_string(), record.timestamp));
        let cell = row.count_mut(record.class);
        *cell = cell.saturating_add(record.predicted_count);
    }

    Ok(ResultTable {
        rows: cells.into_values().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::seconds(secs)
    }

    fn record(pattern: &str, class: VehicleClass, secs: i64, count: u32) -> ForecastRecord {
        ForecastRecord::new(TurningPattern::new(pattern, ""), class, at(secs), count)
    }

    #[test]
    fn empty_records_signal_no_forecasts() {
        assert_eq!(assemble(vec![]).unwrap_err(), ForecastError::NoForecasts);
    }

    #[test]
    fn pivot_fills_absent_classes_with_zero() {
        let table = assemble(vec![record("NE", VehicleClass::Car, 0, 7)]).unwrap();
        assert_eq!(table.len(), 1);

        let row = &table.rows()[0];
        assert_eq!(row.count(VehicleClass::Car), 7);
        for class in [
            VehicleClass::Bicycle,
            VehicleClass::TwoWheeler,
            VehicleClass::Truck,
            VehicleClass::Bus,
        ] {
            assert_eq!(row.count(class), 0);
        }
    }

    #[test]
    fn classes_for_the_same_row_merge() {
        let table = assemble(vec![
            record("NE", VehicleClass::Car, 0, 3),
            record("NE", VehicleClass::Bus, 0, 1),
        ])
        .unwrap();
        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.count(VehicleClass::Car), 3);
        assert_eq!(row.count(VehicleClass::Bus), 1);
    }

    #[test]
    fn duplicate_cells_are_summed() {
        let table = assemble(vec![
            record("NE", VehicleClass::Car, 0, 3),
            record("NE", VehicleClass::Car, 0, 2),
        ])
        .unwrap();
        assert_eq!(table.rows()[0].count(VehicleClass::Car), 5);
    }

    #[test]
    fn rows_sort_by_pattern_then_timestamp() {
        let table = assemble(vec![
            record("SW", VehicleClass::Car, 0, 1),
            record("NE", VehicleClass::Car, 60, 2),
            record("NE", VehicleClass::Car, 0, 3),
        ])
        .unwrap();

        let order: Vec<(String, DateTime<Utc>)> = table
            .rows()
            .iter()
            .map(|r| (r.turning_pattern.clone(), r.timestamp))
            .collect();
        assert_eq!(
            order,
            vec![
                ("NE".to_string(), at(0)),
                ("NE".to_string(), at(60)),
                ("SW".to_string(), at(0)),
            ]
        );
    }

    #[test]
    fn row_order_is_independent_of_record_order() {
        let forward = vec![
            record("NE", VehicleClass::Car, 0, 1),
            record("SW", VehicleClass::Bus, 0, 2),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(
            assemble(forward).unwrap(),
            assemble(reversed).unwrap()
        );
    }

    #[test]
    fn rows_serialize_with_external_column_names() {
        let table = assemble(vec![record("NE", VehicleClass::TwoWheeler, 0, 4)]).unwrap();
        let json = serde_json::to_value(&table).unwrap();

        let row = &json.as_array().unwrap()[0];
        assert_eq!(row["Turning Pattern"], "NE");
        assert_eq!(row["Two Wheeler"], 4);
        assert_eq!(row["Bicycle"], 0);
        assert!(row.get("Timestamp").is_some());
    }
}
