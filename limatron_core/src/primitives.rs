//! # Electrical Primitives
//!
//! Pure sizing functions shared by the feeder and branch-circuit stages:
//! current from power, gauge and breaker selection, voltage drop, and conduit
//! fill. None of these fail; bad numbers clamp to zero and table misses come
//! back as `None` or a sentinel.
//!
//! ## Fixed Electrical Bases
//!
//! | Connection      | Current                |
//! |-----------------|------------------------|
//! | single-phase    | P / 120                |
//! | split-two-phase | P / (√2 · 220)         |
//! | three-phase     | P / (√3 · 220 · 0.86)  |
//!
//! ## Example
//!
//! ```rust
//! use limatron_core::primitives::{current_for, select_gauge, branch_breaker};
//! use limatron_core::system::ConnectionType;
//! use limatron_core::tables::Gauge;
//!
//! let amps = current_for(1800.0, ConnectionType::SinglePhase);
//! assert_eq!(amps, 15.0);
//! assert_eq!(select_gauge(amps), Gauge::Awg14);
//! assert_eq!(branch_breaker(amps), 20);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{VoltageDropFormula, EF_V, EN_V};
use crate::system::{ConnectionType, SystemClass};
use crate::tables::{feeder_impedance_ohm_km, ConduitSize, Gauge, STANDARD_BREAKERS_A};

/// Power factor assumed for three-phase loads
pub const THREE_PHASE_PF: f64 = 0.86;

/// Maximum conduit fill as a fraction of internal area
pub const MAX_FILL_FRACTION: f64 = 0.40;

/// Coerce to a finite, non-negative number
pub(crate) fn non_negative(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        0.0
    }
}

// ============================================================================
// Current
// ============================================================================

/// Line current (A) drawn by `power_w` wired as `connection`.
pub fn current_for(power_w: f64, connection: ConnectionType) -> f64 {
    let p = non_negative(power_w);
    match connection {
        ConnectionType::SinglePhase => p / EN_V,
        ConnectionType::SplitTwoPhase => p / (std::f64::consts::SQRT_2 * EF_V),
        ConnectionType::ThreePhase => p / (3f64.sqrt() * EF_V * THREE_PHASE_PF),
    }
}

// ============================================================================
// Conductor and Protection Selection
// ============================================================================

/// Smallest gauge whose ampacity carries `current_a`, else the largest gauge.
pub fn select_gauge(current_a: f64) -> Gauge {
    let i = non_negative(current_a);
    Gauge::ALL
        .iter()
        .copied()
        .find(|g| i <= g.ampacity_a())
        .unwrap_or(Gauge::LARGEST)
}

/// Smallest standard breaker rated for `current_a`, clamped to the largest.
pub fn select_breaker(current_a: f64) -> u32 {
    let i = non_negative(current_a);
    STANDARD_BREAKERS_A
        .iter()
        .copied()
        .find(|&b| i <= f64::from(b))
        .unwrap_or(STANDARD_BREAKERS_A[STANDARD_BREAKERS_A.len() - 1])
}

/// Branch-circuit breaker from fixed current breakpoints.
pub fn branch_breaker(current_a: f64) -> u32 {
    let i = non_negative(current_a);
    if i <= 12.0 {
        15
    } else if i <= 16.0 {
        20
    } else if i <= 24.0 {
        30
    } else if i <= 32.0 {
        40
    } else {
        50
    }
}

// ============================================================================
// Voltage Drop
// ============================================================================

/// Branch-circuit voltage drop (%) using the branch impedance table.
///
/// `None` when there is no gauge or when current or length is not positive.
pub fn branch_voltage_drop(
    current_a: f64,
    length_m: f64,
    gauge: Option<Gauge>,
    connection: ConnectionType,
) -> Option<f64> {
    let gauge = gauge?;
    let i = non_negative(current_a);
    let l = non_negative(length_m);
    if i <= 0.0 || l <= 0.0 {
        return None;
    }
    let z = gauge.branch_impedance_ohm_km();
    Some(VoltageDropFormula::for_connection(connection).percent(i, l, z))
}

/// Feeder voltage-drop result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeederVoltageDrop {
    /// Voltage drop (%), `None` when the gauge did not resolve
    pub vd_pct: Option<f64>,
    /// Impedance used (Ω/km)
    pub impedance_ohm_km: Option<f64>,
    /// Base voltage of the formula (V)
    pub voltage_base_v: Option<f64>,
    /// Formula tag
    pub formula: Option<String>,
}

/// Feeder voltage drop (%) for `system`, resolving `gauge` through the
/// feeder impedance table.
///
/// The gauge designation is normalized first (`"2AWG"`, `"1/0 awg"`,
/// `"250 kcmil"`...). An unparseable or untabulated designation, or a
/// non-finite current or length, yields a result with no percentage and no
/// formula tag.
pub fn feeder_voltage_drop(
    system: SystemClass,
    current_a: f64,
    length_m: f64,
    gauge: &str,
) -> FeederVoltageDrop {
    let z = feeder_impedance_ohm_km(gauge);
    let z_value = match z {
        Some(z) if current_a.is_finite() && length_m.is_finite() => z,
        _ => {
            return FeederVoltageDrop {
                vd_pct: None,
                impedance_ohm_km: z,
                voltage_base_v: None,
                formula: None,
            }
        }
    };

    let formula = VoltageDropFormula::for_system(system);
    let vd = formula.percent(current_a.max(0.0), length_m.max(0.0), z_value);
    FeederVoltageDrop {
        vd_pct: vd.is_finite().then_some(vd),
        impedance_ohm_km: Some(z_value),
        voltage_base_v: Some(formula.base_voltage()),
        formula: Some(formula.tag().to_string()),
    }
}

// ============================================================================
// Conduit Fill
// ============================================================================

/// Conduit chosen for one run of conductors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitSelection {
    /// Chosen trade size, `None` when even the largest size is too small
    pub size: Option<ConduitSize>,
    /// Trade size label, `≥3"` when nothing fits
    pub label: String,
    /// Total conductor area (mm²)
    pub total_area_mm2: f64,
    /// Occupied fraction of the internal area (%)
    pub fill_pct: Option<f64>,
    /// Occupied fraction of the 40% ceiling (%)
    pub pct_of_max_fill: Option<f64>,
}

impl ConduitSelection {
    /// Check if a standard size holds the conductors
    pub fn fits(&self) -> bool {
        self.size.is_some()
    }
}

/// Smallest conduit whose 40% fill area holds `conductor_count` phase
/// conductors plus one ground.
pub fn select_conduit(
    conductor_count: usize,
    phase_gauge: Option<Gauge>,
    ground_gauge: Option<Gauge>,
) -> ConduitSelection {
    let phase_area = phase_gauge.map_or(0.0, |g| g.area_mm2());
    let ground_area = ground_gauge.map_or(0.0, |g| g.area_mm2());
    let total = conductor_count as f64 * phase_area + ground_area;

    for size in ConduitSize::ALL {
        let internal = size.internal_area_mm2();
        let max_fill = internal * MAX_FILL_FRACTION;
        if total <= max_fill {
            return ConduitSelection {
                size: Some(size),
                label: size.display_name().to_string(),
                total_area_mm2: total,
                fill_pct: Some(total / internal * 100.0),
                pct_of_max_fill: Some(total / max_fill * 100.0),
            };
        }
    }

    ConduitSelection {
        size: None,
        label: format!("≥{}", ConduitSize::LARGEST.display_name()),
        total_area_mm2: total,
        fill_pct: None,
        pct_of_max_fill: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_by_connection() {
        assert!((current_for(1200.0, ConnectionType::SinglePhase) - 10.0).abs() < 1e-9);
        // 3110 / (1.41421 × 220) = 9.996 A
        let split = current_for(3110.0, ConnectionType::SplitTwoPhase);
        assert!((split - 9.9958).abs() < 1e-3, "split = {}", split);
        // 3730 / (1.73205 × 220 × 0.86) = 11.382 A
        let three = current_for(3730.0, ConnectionType::ThreePhase);
        assert!((three - 11.382).abs() < 1e-3, "three = {}", three);
    }

    #[test]
    fn test_current_clamps_bad_power() {
        assert_eq!(current_for(-500.0, ConnectionType::SinglePhase), 0.0);
        assert_eq!(current_for(f64::NAN, ConnectionType::ThreePhase), 0.0);
        assert_eq!(current_for(f64::INFINITY, ConnectionType::SplitTwoPhase), 0.0);
    }

    #[test]
    fn test_select_gauge() {
        assert_eq!(select_gauge(0.0), Gauge::Awg14);
        assert_eq!(select_gauge(15.0), Gauge::Awg14);
        assert_eq!(select_gauge(15.01), Gauge::Awg12);
        assert_eq!(select_gauge(27.33), Gauge::Awg10);
        assert_eq!(select_gauge(95.0), Gauge::Awg2);
        assert_eq!(select_gauge(400.0), Gauge::Awg2);
    }

    #[test]
    fn test_select_breaker() {
        assert_eq!(select_breaker(0.0), 15);
        assert_eq!(select_breaker(27.3), 30);
        assert_eq!(select_breaker(46.0), 50);
        assert_eq!(select_breaker(101.0), 110);
        assert_eq!(select_breaker(900.0), 200);
    }

    #[test]
    fn test_branch_breaker_breakpoints() {
        assert_eq!(branch_breaker(12.0), 15);
        assert_eq!(branch_breaker(12.5), 20);
        assert_eq!(branch_breaker(16.0), 20);
        assert_eq!(branch_breaker(20.0), 30);
        assert_eq!(branch_breaker(32.0), 40);
        assert_eq!(branch_breaker(32.1), 50);
        assert_eq!(branch_breaker(80.0), 50);
    }

    #[test]
    fn test_branch_voltage_drop() {
        // 2 × 8.333 × 10 × 8.9 / 1200 = 1.2361%
        let vd = branch_voltage_drop(1000.0 / 120.0, 10.0, Some(Gauge::Awg14), ConnectionType::SinglePhase);
        assert!((vd.unwrap() - 1.23611).abs() < 1e-4);

        assert_eq!(branch_voltage_drop(5.0, 10.0, None, ConnectionType::SinglePhase), None);
        assert_eq!(branch_voltage_drop(0.0, 10.0, Some(Gauge::Awg14), ConnectionType::SinglePhase), None);
        assert_eq!(branch_voltage_drop(5.0, 0.0, Some(Gauge::Awg14), ConnectionType::SinglePhase), None);
    }

    #[test]
    fn test_feeder_voltage_drop_uses_feeder_table() {
        // 12AWG: feeder Z = 6.30 (branch table has 5.60)
        let vd = feeder_voltage_drop(SystemClass::SplitTwoPhase, 20.0, 15.0, "12AWG");
        // 20 × 15 × 6.3 / 1200 = 1.575%
        assert!((vd.vd_pct.unwrap() - 1.575).abs() < 1e-9);
        assert_eq!(vd.impedance_ohm_km, Some(6.30));
        assert_eq!(vd.voltage_base_v, Some(120.0));
        assert!(vd.formula.unwrap().contains("2f-3h"));
    }

    #[test]
    fn test_feeder_voltage_drop_unknown_gauge() {
        let vd = feeder_voltage_drop(SystemClass::ThreePhase, 20.0, 15.0, "huge wire");
        assert_eq!(vd.vd_pct, None);
        assert_eq!(vd.impedance_ohm_km, None);
        assert_eq!(vd.voltage_base_v, None);
        assert_eq!(vd.formula, None);
    }

    #[test]
    fn test_feeder_voltage_drop_non_finite_current() {
        let vd = feeder_voltage_drop(SystemClass::SinglePhase, f64::NAN, 15.0, "10AWG");
        assert_eq!(vd.vd_pct, None);
        assert_eq!(vd.impedance_ohm_km, Some(3.60));
        assert_eq!(vd.formula, None);
    }

    #[test]
    fn test_feeder_voltage_drop_large_conductor() {
        // √3 × 200 × 30 × 0.187 / 2200 = 0.8833%
        let vd = feeder_voltage_drop(SystemClass::ThreePhase, 200.0, 30.0, "500 kcmil");
        assert!((vd.vd_pct.unwrap() - 0.88335).abs() < 1e-4);
        assert_eq!(vd.voltage_base_v, Some(220.0));
    }

    #[test]
    fn test_select_conduit_smallest_fit() {
        // 2 × 15.68 + 15.68 = 47.04 mm² fits 1/2" (70.4 mm² at 40%)
        let sel = select_conduit(2, Some(Gauge::Awg10), Some(Gauge::Awg10));
        assert_eq!(sel.size, Some(ConduitSize::Half));
        assert!((sel.total_area_mm2 - 47.04).abs() < 1e-9);
        assert!((sel.fill_pct.unwrap() - 26.727).abs() < 1e-3);
        assert!((sel.pct_of_max_fill.unwrap() - 66.818).abs() < 1e-3);
    }

    #[test]
    fn test_select_conduit_steps_up() {
        // 4 × 33.6 + 33.6 = 168 mm² > 121.6 (3/4" at 40%), fits 1" (208)
        let sel = select_conduit(4, Some(Gauge::Awg2), Some(Gauge::Awg2));
        assert_eq!(sel.size, Some(ConduitSize::One));
        assert_eq!(sel.label, "1\"");
    }

    #[test]
    fn test_select_conduit_overflow() {
        let sel = select_conduit(100, Some(Gauge::Awg2), Some(Gauge::Awg2));
        assert!(!sel.fits());
        assert_eq!(sel.label, "≥3\"");
        assert_eq!(sel.fill_pct, None);
        assert_eq!(sel.pct_of_max_fill, None);
    }
}
