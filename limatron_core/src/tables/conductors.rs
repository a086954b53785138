//! Branch Conductor Gauges
//!
//! Copper building-wire gauges used for branch circuits and feeders, with the
//! ampacity, effective impedance and cross-section area tabulated per gauge.
//!
//! ## Table (Cu THW, 60 °C)
//!
//! | Gauge | Ampacity | Z (Ω/km) | Area (mm²) |
//! |-------|----------|----------|------------|
//! | 14AWG | 15 A     | 8.90     | 2.08       |
//! | 12AWG | 20 A     | 5.60     | 3.31       |
//! | 10AWG | 30 A     | 3.60     | 15.68      |
//! | 8AWG  | 40 A     | 2.26     | 8.37       |
//! | 6AWG  | 55 A     | 1.51     | 13.3       |
//! | 4AWG  | 70 A     | 1.21     | 21.1       |
//! | 2AWG  | 95 A     | 0.98     | 33.6       |
//!
//! The impedance column is the branch-circuit table. Feeders resolve their
//! impedance through [`super::feeder_impedance`], which carries different
//! values for several gauges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tabulated conductor gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gauge {
    #[serde(rename = "14AWG")]
    Awg14,
    #[serde(rename = "12AWG")]
    Awg12,
    #[serde(rename = "10AWG")]
    Awg10,
    #[serde(rename = "8AWG")]
    Awg8,
    #[serde(rename = "6AWG")]
    Awg6,
    #[serde(rename = "4AWG")]
    Awg4,
    #[serde(rename = "2AWG")]
    Awg2,
}

impl Gauge {
    /// All gauges in ascending ampacity order
    pub const ALL: [Gauge; 7] = [
        Gauge::Awg14,
        Gauge::Awg12,
        Gauge::Awg10,
        Gauge::Awg8,
        Gauge::Awg6,
        Gauge::Awg4,
        Gauge::Awg2,
    ];

    /// Largest tabulated gauge, used when no gauge carries the current
    pub const LARGEST: Gauge = Gauge::Awg2;

    /// Allowable ampacity in amperes
    pub fn ampacity_a(&self) -> f64 {
        match self {
            Gauge::Awg14 => 15.0,
            Gauge::Awg12 => 20.0,
            Gauge::Awg10 => 30.0,
            Gauge::Awg8 => 40.0,
            Gauge::Awg6 => 55.0,
            Gauge::Awg4 => 70.0,
            Gauge::Awg2 => 95.0,
        }
    }

    /// Effective impedance for branch circuits (Ω/km)
    pub fn branch_impedance_ohm_km(&self) -> f64 {
        match self {
            Gauge::Awg14 => 8.90,
            Gauge::Awg12 => 5.60,
            Gauge::Awg10 => 3.60,
            Gauge::Awg8 => 2.26,
            Gauge::Awg6 => 1.51,
            Gauge::Awg4 => 1.21,
            Gauge::Awg2 => 0.98,
        }
    }

    /// Conductor cross-section area including insulation (mm²)
    pub fn area_mm2(&self) -> f64 {
        match self {
            Gauge::Awg14 => 2.08,
            Gauge::Awg12 => 3.31,
            Gauge::Awg10 => 15.68,
            Gauge::Awg8 => 8.37,
            Gauge::Awg6 => 13.3,
            Gauge::Awg4 => 21.1,
            Gauge::Awg2 => 33.6,
        }
    }

    /// Get display name (e.g., "12AWG")
    pub fn display_name(&self) -> &'static str {
        match self {
            Gauge::Awg14 => "14AWG",
            Gauge::Awg12 => "12AWG",
            Gauge::Awg10 => "10AWG",
            Gauge::Awg8 => "8AWG",
            Gauge::Awg6 => "6AWG",
            Gauge::Awg4 => "4AWG",
            Gauge::Awg2 => "2AWG",
        }
    }
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
