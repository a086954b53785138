//! # Supply System Types
//!
//! The three vocabularies the engine keys its formulas on:
//!
//! - [`ConnectionType`] - how an individual load is wired
//! - [`SystemClass`] - the supply serving the whole installation
//! - [`ForcedMode`] - the caller's choice of supply (or `auto`)
//!
//! Payloads in the field spell these many ways (`mono`, `single-phase`,
//! `1f`...). Deserialization is lenient: connection types fall back to
//! single-phase and forced modes to `auto` when the string is not
//! recognized. [`std::str::FromStr`] is strict and reports the bad value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::{CalcError, CalcResult};

/// The string in a payload value; anything else reads as absent.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn canonical(s: &str) -> String {
    s.trim().to_lowercase().replace(['_', ' '], "-")
}

// ============================================================================
// Connection Type
// ============================================================================

/// Wiring of a single load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionType {
    /// Line to neutral, 120 V
    #[default]
    SinglePhase,
    /// Two lines plus neutral
    SplitTwoPhase,
    /// Three lines, 220 V line to line
    ThreePhase,
}

impl ConnectionType {
    /// Number of supply phases the load spans
    pub fn phase_span(&self) -> usize {
        match self {
            ConnectionType::SinglePhase => 1,
            ConnectionType::SplitTwoPhase => 2,
            ConnectionType::ThreePhase => 3,
        }
    }

    /// Short code used in circuit listings
    pub fn code(&self) -> &'static str {
        match self {
            ConnectionType::SinglePhase => "1F",
            ConnectionType::SplitTwoPhase => "2F",
            ConnectionType::ThreePhase => "3F",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConnectionType::SinglePhase => "single-phase",
            ConnectionType::SplitTwoPhase => "split-two-phase",
            ConnectionType::ThreePhase => "three-phase",
        }
    }

    fn recognize(s: &str) -> Option<Self> {
        match canonical(s).as_str() {
            "single" | "single-phase" | "mono" | "monofasico" | "monofásico" | "1f" | "1" => {
                Some(ConnectionType::SinglePhase)
            }
            "split" | "split-two-phase" | "two-phase" | "bifa" | "bifasico" | "bifásico" | "2f" | "2" => {
                Some(ConnectionType::SplitTwoPhase)
            }
            "three" | "three-phase" | "trifa" | "trifasico" | "trifásico" | "3f" | "3" => {
                Some(ConnectionType::ThreePhase)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ConnectionType {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        ConnectionType::recognize(s)
            .ok_or_else(|| CalcError::invalid_input("connection", s, "Expected single, split or three"))
    }
}

impl<'de> Deserialize<'de> for ConnectionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient_string(deserializer)?;
        Ok(raw
            .as_deref()
            .and_then(ConnectionType::recognize)
            .unwrap_or_default())
    }
}

// ============================================================================
// System Class
// ============================================================================

/// Supply system serving the installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemClass {
    /// 1 phase, 2 wires
    SinglePhase,
    /// 2 phases, 3 wires
    SplitTwoPhase,
    /// 3 phases, 4 wires
    ThreePhase,
}

impl SystemClass {
    /// Number of phases available for balancing
    pub fn phase_count(&self) -> usize {
        match self {
            SystemClass::SinglePhase => 1,
            SystemClass::SplitTwoPhase => 2,
            SystemClass::ThreePhase => 3,
        }
    }

    /// Conductors in the feeder run, ground included
    pub fn feeder_conductor_count(&self) -> usize {
        match self {
            SystemClass::SinglePhase => 3,
            SystemClass::SplitTwoPhase => 4,
            SystemClass::ThreePhase => 5,
        }
    }

    /// Whether a load wired as `connection` can be served by this system
    pub fn accepts(&self, connection: ConnectionType) -> bool {
        connection.phase_span() <= self.phase_count()
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            SystemClass::SinglePhase => "Single-phase",
            SystemClass::SplitTwoPhase => "Split-two-phase",
            SystemClass::ThreePhase => "Three-phase",
        }
    }
}

impl fmt::Display for SystemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Forced Mode
// ============================================================================

/// Caller's supply selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ForcedMode {
    /// Use the demand-based recommendation
    #[default]
    Auto,
    /// Force a single-phase supply
    Single,
    /// Force a split two-phase supply
    Split,
    /// Force a three-phase supply
    Three,
}

impl ForcedMode {
    /// The system this mode forces, `None` for `auto`
    pub fn forced_system(&self) -> Option<SystemClass> {
        match self {
            ForcedMode::Auto => None,
            ForcedMode::Single => Some(SystemClass::SinglePhase),
            ForcedMode::Split => Some(SystemClass::SplitTwoPhase),
            ForcedMode::Three => Some(SystemClass::ThreePhase),
        }
    }

    fn recognize(s: &str) -> Option<Self> {
        match canonical(s).as_str() {
            "auto" | "" => Some(ForcedMode::Auto),
            other => ConnectionType::recognize(other).map(|c| match c {
                ConnectionType::SinglePhase => ForcedMode::Single,
                ConnectionType::SplitTwoPhase => ForcedMode::Split,
                ConnectionType::ThreePhase => ForcedMode::Three,
            }),
        }
    }
}

impl fmt::Display for ForcedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ForcedMode::Auto => "auto",
            ForcedMode::Single => "single",
            ForcedMode::Split => "split",
            ForcedMode::Three => "three",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ForcedMode {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        ForcedMode::recognize(s)
            .ok_or_else(|| CalcError::invalid_input("forced_mode", s, "Expected auto, single, split or three"))
    }
}

impl<'de> Deserialize<'de> for ForcedMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient_string(deserializer)?;
        Ok(raw.as_deref().and_then(ForcedMode::recognize).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_accepts() {
        use ConnectionType::*;
        assert!(SystemClass::SinglePhase.accepts(SinglePhase));
        assert!(!SystemClass::SinglePhase.accepts(SplitTwoPhase));
        assert!(!SystemClass::SinglePhase.accepts(ThreePhase));
        assert!(SystemClass::SplitTwoPhase.accepts(SplitTwoPhase));
        assert!(!SystemClass::SplitTwoPhase.accepts(ThreePhase));
        assert!(SystemClass::ThreePhase.accepts(ThreePhase));
    }

    #[test]
    fn test_lenient_connection_deserialize() {
        let parsed: Vec<ConnectionType> =
            serde_json::from_str(r#"["trifa", "Split", null, "bogus", "three-phase"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                ConnectionType::ThreePhase,
                ConnectionType::SplitTwoPhase,
                ConnectionType::SinglePhase,
                ConnectionType::SinglePhase,
                ConnectionType::ThreePhase,
            ]
        );
    }

    #[test]
    fn test_strict_parse() {
        assert_eq!("mono".parse::<ConnectionType>().unwrap(), ConnectionType::SinglePhase);
        assert!("quad".parse::<ConnectionType>().is_err());
        assert_eq!("bifa".parse::<ForcedMode>().unwrap(), ForcedMode::Split);
        assert_eq!("AUTO".parse::<ForcedMode>().unwrap(), ForcedMode::Auto);
        assert!("sometimes".parse::<ForcedMode>().is_err());
    }

    #[test]
    fn test_unknown_mode_is_auto() {
        let mode: ForcedMode = serde_json::from_str("\"whatever\"").unwrap();
        assert_eq!(mode, ForcedMode::Auto);
        assert_eq!(mode.forced_system(), None);
    }

    #[test]
    fn test_non_string_values_default() {
        let modes: Vec<ForcedMode> = serde_json::from_str(r#"[3, true, {"m": "three"}, null]"#).unwrap();
        assert!(modes.iter().all(|m| *m == ForcedMode::Auto));

        let connections: Vec<ConnectionType> = serde_json::from_str(r#"[3, [], 2.5]"#).unwrap();
        assert!(connections.iter().all(|c| *c == ConnectionType::SinglePhase));
    }

    #[test]
    fn test_conductor_counts() {
        assert_eq!(SystemClass::SinglePhase.feeder_conductor_count(), 3);
        assert_eq!(SystemClass::SplitTwoPhase.feeder_conductor_count(), 4);
        assert_eq!(SystemClass::ThreePhase.feeder_conductor_count(), 5);
    }
}
