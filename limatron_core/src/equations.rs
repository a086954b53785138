//! # Voltage-Drop Equations
//!
//! The three percentage voltage-drop formulas, one per wiring arrangement.
//! Branch circuits pick a formula from their own [`ConnectionType`]; the
//! feeder picks one from the [`SystemClass`].
//!
//! ```text
//! 1f-2h:   %e = 2·I·L·Z / (En·10)     En = 120 V
//! 2f-3h:   %e =   I·L·Z / (En·10)     En = 120 V
//! 3f-4h:   %e = √3·I·L·Z / (Ef·10)    Ef = 220 V
//! ```
//!
//! with I in amperes, L in meters and Z in Ω/km.
//!
//! ## Example
//!
//! ```rust
//! use limatron_core::equations::VoltageDropFormula;
//! use limatron_core::system::SystemClass;
//!
//! let formula = VoltageDropFormula::for_system(SystemClass::SinglePhase);
//! let pct = formula.percent(10.0, 20.0, 3.6);
//! assert!((pct - 1.2).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::system::{ConnectionType, SystemClass};

/// Line-to-neutral base voltage (V)
pub const EN_V: f64 = 120.0;

/// Line-to-line base voltage (V)
pub const EF_V: f64 = 220.0;

/// Voltage-drop formula by wiring arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoltageDropFormula {
    /// Single phase, two wires
    SinglePhaseTwoWire,
    /// Two phases, three wires
    TwoPhaseThreeWire,
    /// Three phases, four wires
    ThreePhaseFourWire,
}

impl VoltageDropFormula {
    /// Formula for a branch load's own connection
    pub fn for_connection(connection: ConnectionType) -> Self {
        match connection {
            ConnectionType::SinglePhase => VoltageDropFormula::SinglePhaseTwoWire,
            ConnectionType::SplitTwoPhase => VoltageDropFormula::TwoPhaseThreeWire,
            ConnectionType::ThreePhase => VoltageDropFormula::ThreePhaseFourWire,
        }
    }

    /// Formula for a feeder serving `system`
    pub fn for_system(system: SystemClass) -> Self {
        match system {
            SystemClass::SinglePhase => VoltageDropFormula::SinglePhaseTwoWire,
            SystemClass::SplitTwoPhase => VoltageDropFormula::TwoPhaseThreeWire,
            SystemClass::ThreePhase => VoltageDropFormula::ThreePhaseFourWire,
        }
    }

    /// Base voltage in the denominator
    pub fn base_voltage(&self) -> f64 {
        match self {
            VoltageDropFormula::SinglePhaseTwoWire | VoltageDropFormula::TwoPhaseThreeWire => EN_V,
            VoltageDropFormula::ThreePhaseFourWire => EF_V,
        }
    }

    /// Multiplier on I·L·Z
    fn coefficient(&self) -> f64 {
        match self {
            VoltageDropFormula::SinglePhaseTwoWire => 2.0,
            VoltageDropFormula::TwoPhaseThreeWire => 1.0,
            VoltageDropFormula::ThreePhaseFourWire => 3f64.sqrt(),
        }
    }

    /// Voltage drop in percent
    pub fn percent(&self, current_a: f64, length_m: f64, z_ohm_km: f64) -> f64 {
        (self.coefficient() * current_a * length_m * z_ohm_km) / (self.base_voltage() * 10.0)
    }

    /// Formula tag reported alongside the result
    pub fn tag(&self) -> &'static str {
        match self {
            VoltageDropFormula::SinglePhaseTwoWire => "%e = (2·I·L·Z) / (En·10)  [1f-2h, En=120]",
            VoltageDropFormula::TwoPhaseThreeWire => "%e = (I·L·Z) / (En·10)  [2f-3h, En=120]",
            VoltageDropFormula::ThreePhaseFourWire => "%e = (√3·I·L·Z) / (Ef·10)  [3f-4h, Ef=220]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_phase_is_twice_two_phase() {
        let one = VoltageDropFormula::SinglePhaseTwoWire.percent(8.0, 12.0, 5.6);
        let two = VoltageDropFormula::TwoPhaseThreeWire.percent(8.0, 12.0, 5.6);
        assert!((one - 2.0 * two).abs() < 1e-12);
    }

    #[test]
    fn test_three_phase_formula() {
        // √3 × 10 × 10 × 8.9 / 2200 = 0.7007%
        let pct = VoltageDropFormula::ThreePhaseFourWire.percent(10.0, 10.0, 8.9);
        assert!((pct - 0.70067).abs() < 1e-4, "pct = {}", pct);
        assert_eq!(VoltageDropFormula::ThreePhaseFourWire.base_voltage(), 220.0);
    }

    #[test]
    fn test_selection_agrees() {
        assert_eq!(
            VoltageDropFormula::for_connection(ConnectionType::SplitTwoPhase),
            VoltageDropFormula::for_system(SystemClass::SplitTwoPhase)
        );
        assert!(VoltageDropFormula::for_system(SystemClass::ThreePhase).tag().contains("3f-4h"));
    }
}
