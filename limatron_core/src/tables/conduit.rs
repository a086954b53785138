//! Standard Conduit Sizes
//!
//! Trade sizes with their internal area, ascending. Fill selection scans this
//! list in order and stops at the first size that holds the conductors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Standard conduit trade size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConduitSize {
    #[serde(rename = "1/2\"")]
    Half,
    #[serde(rename = "3/4\"")]
    ThreeQuarter,
    #[serde(rename = "1\"")]
    One,
    #[serde(rename = "1-1/4\"")]
    OneAndQuarter,
    #[serde(rename = "1-1/2\"")]
    OneAndHalf,
    #[serde(rename = "2\"")]
    Two,
    #[serde(rename = "2-1/2\"")]
    TwoAndHalf,
    #[serde(rename = "3\"")]
    Three,
}

impl ConduitSize {
    /// All sizes, smallest first
    pub const ALL: [ConduitSize; 8] = [
        ConduitSize::Half,
        ConduitSize::ThreeQuarter,
        ConduitSize::One,
        ConduitSize::OneAndQuarter,
        ConduitSize::OneAndHalf,
        ConduitSize::Two,
        ConduitSize::TwoAndHalf,
        ConduitSize::Three,
    ];

    /// Largest stocked size
    pub const LARGEST: ConduitSize = ConduitSize::Three;

    /// Internal cross-section area (mm²)
    pub fn internal_area_mm2(&self) -> f64 {
        match self {
            ConduitSize::Half => 176.0,
            ConduitSize::ThreeQuarter => 304.0,
            ConduitSize::One => 520.0,
            ConduitSize::OneAndQuarter => 884.0,
            ConduitSize::OneAndHalf => 1272.0,
            ConduitSize::Two => 2108.0,
            ConduitSize::TwoAndHalf => 3783.0,
            ConduitSize::Three => 5701.0,
        }
    }

    /// Trade size label (e.g., `3/4"`)
    pub fn display_name(&self) -> &'static str {
        match self {
            ConduitSize::Half => "1/2\"",
            ConduitSize::ThreeQuarter => "3/4\"",
            ConduitSize::One => "1\"",
            ConduitSize::OneAndQuarter => "1-1/4\"",
            ConduitSize::OneAndHalf => "1-1/2\"",
            ConduitSize::Two => "2\"",
            ConduitSize::TwoAndHalf => "2-1/2\"",
            ConduitSize::Three => "3\"",
        }
    }
}

impl fmt::Display for ConduitSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
