//! # Load Inventory Input
//!
//! [`LoadInput`] is the payload the engine sizes from: the facility's raw
//! load inventory, run lengths, an optional forced supply mode and optional
//! manual phase assignments.
//!
//! ## Coercion
//!
//! Payloads arrive from forms, so numeric fields are forgiving: JSON numbers,
//! numeric strings and `null` are all accepted. Anything that is not a
//! finite, non-negative number becomes 0; counts are floored. A list that is
//! `null` or not an array reads as empty, and connection or mode values that
//! are not strings take their defaults. Nothing in the inventory is rejected;
//! the one payload error is a phase assignment naming an unknown circuit.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "fixtures": 20,
//!   "fixture_watts": 100,
//!   "receptacles": "10",
//!   "special_receptacles": 1,
//!   "pumps": [{ "hp": 1.5, "connection": "split" }],
//!   "specific_receptacles": [{ "watts": 3500, "connection": "single" }],
//!   "feeder_length_m": 25,
//!   "lighting_lengths_m": "12, 18",
//!   "forced_mode": "auto",
//!   "phase_assignments": [{ "circuit": "pumps_0", "phase": 2 }]
//! }
//! ```
//!
//! ```rust
//! use limatron_core::input::LoadInput;
//!
//! let input = LoadInput::from_json(r#"{ "fixtures": "8", "fixture_watts": -40 }"#).unwrap();
//! assert_eq!(input.fixtures, 8);
//! assert_eq!(input.fixture_watts, 0.0);
//! ```

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::calculations::circuits::CircuitId;
use crate::errors::CalcResult;
use crate::primitives::non_negative;
use crate::system::{ConnectionType, ForcedMode};

// ============================================================================
// Lenient numeric coercion
// ============================================================================

/// Coerce an arbitrary JSON value to a finite, non-negative number.
fn coerce_value(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    non_negative(raw)
}

fn coerce_count(value: &Value) -> u32 {
    let n = coerce_value(value).floor();
    if n >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        n as u32
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(coerce_value(&Value::deserialize(d)?))
}

fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(coerce_count(&Value::deserialize(d)?))
}

/// A JSON array of `T`; `null` or any non-array reads as empty.
fn lenient_list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

fn default_pump_hp() -> f64 {
    1.0
}

// ============================================================================
// Run lengths
// ============================================================================

/// Branch run lengths (m), one per circuit of a category.
///
/// Deserializes from a JSON array or a comma-separated string. Entries that
/// are missing or not positive fall back to the default branch length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RunLengths(pub Vec<f64>);

impl RunLengths {
    /// Lengths for `count` circuits, falling back to `default_m`.
    pub fn resolve(&self, count: usize, default_m: f64) -> Vec<f64> {
        (0..count)
            .map(|i| match self.0.get(i).copied().map(non_negative) {
                Some(len) if len > 0.0 => len,
                _ => default_m,
            })
            .collect()
    }
}

impl From<Vec<f64>> for RunLengths {
    fn from(lengths: Vec<f64>) -> Self {
        RunLengths(lengths)
    }
}

impl<'de> Deserialize<'de> for RunLengths {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let lengths = match Value::deserialize(d)? {
            Value::Array(items) => items.iter().map(coerce_value).collect(),
            Value::String(s) if !s.trim().is_empty() => s
                .split(',')
                .map(|part| coerce_value(&Value::String(part.to_string())))
                .collect(),
            _ => Vec::new(),
        };
        Ok(RunLengths(lengths))
    }
}

// ============================================================================
// Dedicated loads
// ============================================================================

/// A pump on its own circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpLoad {
    /// Motor rating in horsepower (1 HP when omitted)
    #[serde(default = "default_pump_hp", deserialize_with = "lenient_number")]
    pub hp: f64,
    /// Motor wiring
    #[serde(default)]
    pub connection: ConnectionType,
}

impl PumpLoad {
    /// Create a pump load
    pub fn new(hp: f64, connection: ConnectionType) -> Self {
        PumpLoad { hp, connection }
    }
}

/// A receptacle dedicated to one appliance of known wattage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificReceptacle {
    /// Appliance power (W)
    #[serde(default, deserialize_with = "lenient_number")]
    pub watts: f64,
    /// Receptacle wiring
    #[serde(default)]
    pub connection: ConnectionType,
}

impl SpecificReceptacle {
    /// Create a specific receptacle
    pub fn new(watts: f64, connection: ConnectionType) -> Self {
        SpecificReceptacle { watts, connection }
    }
}

/// Caller-chosen phase for one circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseOverride {
    /// Circuit identity, e.g. `"lighting_0"`
    pub circuit: CircuitId,
    /// Phase number, 1-based; 0 when missing, which leaves the circuit to
    /// the balancer
    #[serde(default, deserialize_with = "lenient_count")]
    pub phase: u32,
}

// ============================================================================
// Load input
// ============================================================================

/// Facility load inventory and calculation options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadInput {
    /// Lighting fixture count
    #[serde(deserialize_with = "lenient_count")]
    pub fixtures: u32,
    /// Watts per lighting fixture
    #[serde(deserialize_with = "lenient_number")]
    pub fixture_watts: f64,
    /// General-purpose receptacle count
    #[serde(deserialize_with = "lenient_count")]
    pub receptacles: u32,
    /// Special (dedicated, fixed VA) receptacle count
    #[serde(deserialize_with = "lenient_count")]
    pub special_receptacles: u32,
    /// Pumps, one circuit each
    #[serde(deserialize_with = "lenient_list")]
    pub pumps: Vec<PumpLoad>,
    /// Specific receptacles, one circuit each
    #[serde(deserialize_with = "lenient_list")]
    pub specific_receptacles: Vec<SpecificReceptacle>,

    /// Feeder run length (m); 0 means the default
    #[serde(deserialize_with = "lenient_number")]
    pub feeder_length_m: f64,
    /// Lighting circuit lengths (m)
    pub lighting_lengths_m: RunLengths,
    /// Receptacle circuit lengths (m)
    pub receptacle_lengths_m: RunLengths,
    /// Special receptacle circuit lengths (m)
    pub special_lengths_m: RunLengths,
    /// Pump circuit lengths (m)
    pub pump_lengths_m: RunLengths,
    /// Specific receptacle circuit lengths (m)
    pub specific_lengths_m: RunLengths,

    /// Supply selection
    pub forced_mode: ForcedMode,
    /// Manual phase assignments; the balancer places everything else
    #[serde(deserialize_with = "lenient_list")]
    pub phase_assignments: Vec<PhaseOverride>,
}

impl LoadInput {
    /// Parse a JSON payload.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder: set lighting fixtures
    pub fn with_lighting(mut self, fixtures: u32, fixture_watts: f64) -> Self {
        self.fixtures = fixtures;
        self.fixture_watts = fixture_watts;
        self
    }

    /// Builder: set general receptacles
    pub fn with_receptacles(mut self, count: u32) -> Self {
        self.receptacles = count;
        self
    }

    /// Builder: set special receptacles
    pub fn with_special_receptacles(mut self, count: u32) -> Self {
        self.special_receptacles = count;
        self
    }

    /// Builder: add a pump
    pub fn with_pump(mut self, hp: f64, connection: ConnectionType) -> Self {
        self.pumps.push(PumpLoad::new(hp, connection));
        self
    }

    /// Builder: add a specific receptacle
    pub fn with_specific_receptacle(mut self, watts: f64, connection: ConnectionType) -> Self {
        self.specific_receptacles.push(SpecificReceptacle::new(watts, connection));
        self
    }

    /// Builder: force a supply mode
    pub fn with_mode(mut self, mode: ForcedMode) -> Self {
        self.forced_mode = mode;
        self
    }

    /// Builder: pin a circuit to a phase
    pub fn with_phase(mut self, circuit: CircuitId, phase: u32) -> Self {
        self.phase_assignments.push(PhaseOverride { circuit, phase });
        self
    }
}
