//! Vehicle detection events and the keys that partition them into series.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// The closed set of vehicle categories tracked by the system.
///
/// Declaration order is the fixed column order of the result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VehicleClass {
    Bicycle,
    Car,
    TwoWheeler,
    Truck,
    Bus,
}

impl VehicleClass {
    /// All valid classes, in result-table column order.
    pub const ALL: [VehicleClass; 5] = [
        VehicleClass::Bicycle,
        VehicleClass::Car,
        VehicleClass::TwoWheeler,
        VehicleClass::Truck,
        VehicleClass::Bus,
    ];

    /// Canonical display label, as it appears in input rows and output columns.
    pub fn label(&self) -> &'static str {
        match self {
            VehicleClass::Bicycle => "Bicycle",
            VehicleClass::Car => "Car",
            VehicleClass::TwoWheeler => "Two Wheeler",
            VehicleClass::Truck => "Truck",
            VehicleClass::Bus => "Bus",
        }
    }

    /// Parse a class label. Returns `None` for anything outside the valid
    /// set; unrecognized classes are silently dropped upstream, never an error.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Bicycle" => Some(VehicleClass::Bicycle),
            "Car" => Some(VehicleClass::Car),
            "Two Wheeler" => Some(VehicleClass::TwoWheeler),
            "Truck" => Some(VehicleClass::Truck),
            "Bus" => Some(VehicleClass::Bus),
            _ => None,
        }
    }

    /// Position of this class in the fixed column order.
    pub fn index(&self) -> usize {
        match self {
            VehicleClass::Bicycle => 0,
            VehicleClass::Car => 1,
            VehicleClass::TwoWheeler => 2,
            VehicleClass::Truck => 3,
            VehicleClass::Bus => 4,
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One vehicle detection, as handed in by the excluded I/O layer.
///
/// Field names match the input tabular format, so the I/O layer can
/// deserialize rows directly into this type.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub start_point: String,
    pub end_point: String,
    pub vehicle_class: String,
}

impl Event {
    pub fn new(
        timestamp: DateTime<Utc>,
        start_point: impl Into<String>,
        end_point: impl Into<String>,
        vehicle_class: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            start_point: start_point.into(),
            end_point: end_point.into(),
            vehicle_class: vehicle_class.into(),
        }
    }

    /// Derive the movement key for this event.
    pub fn turning_pattern(&self) -> TurningPattern {
        TurningPattern::new(&self.start_point, &self.end_point)
    }
}

/// Identifier for a directional movement through an intersection.
///
/// Derived by concatenating the origin and destination labels; the rest of
/// the pipeline treats it as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TurningPattern(String);

impl TurningPattern {
    pub fn new(start_point: &str, end_point: &str) -> Self {
        Self(format!("{start_point}{end_point}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TurningPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Uniquely identifies one independent time series: every valid event maps
/// to exactly one group key.
///
/// `Ord` makes group iteration order lexical and deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub pattern: TurningPattern,
    pub class: VehicleClass,
}

impl GroupKey {
    pub fn new(pattern: TurningPattern, class: VehicleClass) -> Self {
        Self { pattern, class }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.pattern, self.class)
    }
}
