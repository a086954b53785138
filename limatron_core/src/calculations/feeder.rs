//! Feeder sizing from the final demand.

use serde::{Deserialize, Serialize};

use crate::equations::EN_V;
use crate::primitives::{feeder_voltage_drop, non_negative, select_breaker, select_gauge};
use crate::system::SystemClass;
use crate::tables::{Gauge, MIN_BREAKER_A};

/// Sized feeder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeederDesign {
    /// Demand current (A)
    pub current_a: f64,
    pub gauge: Gauge,
    /// Main breaker (A)
    pub breaker_a: u32,
    /// Run length (m)
    pub length_m: f64,
    /// Conductors in the run, ground included
    pub conductor_count: usize,
    /// Voltage drop (%)
    pub vd_pct: Option<f64>,
    /// Feeder impedance used (Ω/km)
    pub impedance_ohm_km: Option<f64>,
    /// Base voltage of the formula (V)
    pub voltage_base_v: Option<f64>,
    /// Formula tag
    pub formula: Option<String>,
}

/// Size the feeder for `demand_va` over `length_m`.
///
/// The breaker is the smaller of the one rated for the demand current and the
/// one rated for the conductor ampacity, never below the minimum breaker.
pub fn size_feeder(system: SystemClass, demand_va: f64, length_m: f64) -> FeederDesign {
    let current = non_negative(demand_va) / EN_V;
    let gauge = select_gauge(current);
    let breaker = select_breaker(current)
        .min(select_breaker(gauge.ampacity_a()))
        .max(MIN_BREAKER_A);
    let vd = feeder_voltage_drop(system, current, length_m, gauge.display_name());

    FeederDesign {
        current_a: current,
        gauge,
        breaker_a: breaker,
        length_m,
        conductor_count: system.feeder_conductor_count(),
        vd_pct: vd.vd_pct,
        impedance_ohm_km: vd.impedance_ohm_km,
        voltage_base_v: vd.voltage_base_v,
        formula: vd.formula,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feeder_single_phase() {
        // 3280 VA / 120 = 27.33 A → 10AWG, 30 A
        let feeder = size_feeder(SystemClass::SinglePhase, 3280.0, 15.0);
        assert!((feeder.current_a - 27.3333).abs() < 1e-3);
        assert_eq!(feeder.gauge, Gauge::Awg10);
        assert_eq!(feeder.breaker_a, 30);
        assert_eq!(feeder.conductor_count, 3);
        // 2 × 27.333 × 15 × 3.6 / 1200 = 2.46%
        assert!((feeder.vd_pct.unwrap() - 2.46).abs() < 1e-9);
    }

    #[test]
    fn test_feeder_breaker_capped_by_ampacity() {
        // 13000 VA / 120 = 108.3 A → 2AWG (95 A); breaker min(110, 100)
        let feeder = size_feeder(SystemClass::ThreePhase, 13000.0, 20.0);
        assert_eq!(feeder.gauge, Gauge::Awg2);
        assert_eq!(feeder.breaker_a, 100);
        assert_eq!(feeder.voltage_base_v, Some(220.0));
    }

    #[test]
    fn test_feeder_empty_demand() {
        let feeder = size_feeder(SystemClass::SinglePhase, 0.0, 15.0);
        assert_eq!(feeder.gauge, Gauge::Awg14);
        assert_eq!(feeder.breaker_a, 15);
        assert_eq!(feeder.vd_pct, Some(0.0));
    }
}
