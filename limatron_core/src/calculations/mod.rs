//! # Distribution Design
//!
//! Runs a load inventory through every sizing stage and collects the result:
//!
//! 1. Demand on the full inventory and the recommended supply
//! 2. The supply actually used (forced or recommended)
//! 3. Branch circuits, with loads the supply cannot serve marked invalid
//! 4. Demand again over the valid loads, and the feeder sized from it
//! 5. Phase balancing, grounding, conduit and the voltage-drop check
//!
//! ## Example
//!
//! ```rust
//! use limatron_core::calculations::calculate;
//! use limatron_core::input::LoadInput;
//! use limatron_core::system::{ForcedMode, SystemClass};
//!
//! let input = LoadInput::default()
//!     .with_lighting(20, 100.0)
//!     .with_receptacles(10)
//!     .with_mode(ForcedMode::Single);
//!
//! let result = calculate(&input);
//! assert_eq!(result.system, SystemClass::SinglePhase);
//! assert!((result.demand.demand_va - 3280.0).abs() < 1e-9);
//! assert_eq!(result.circuits.len(), 4);
//! ```

pub mod balance;
pub mod circuits;
pub mod demand;
pub mod feeder;
pub mod raceway;
pub mod validity;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub use balance::{PhaseAssignment, PhaseBalance};
pub use circuits::{CategorySummary, CircuitCategory, CircuitId, DerivedCircuit};
pub use demand::{DemandSummary, LoadBreakdown};
pub use feeder::FeederDesign;
pub use raceway::{ConduitSchedule, GroundSelection};

use crate::input::LoadInput;
use crate::settings::DesignSettings;
use crate::system::{ForcedMode, SystemClass};

/// Feeder and branch voltage drop against the design limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropCheck {
    /// Feeder drop (%)
    pub feeder_vd_pct: Option<f64>,
    /// Highest drop over the valid branch circuits (%)
    pub worst_branch_vd_pct: Option<f64>,
    /// Feeder plus worst branch (%)
    pub total_vd_pct: f64,
    pub feeder_limit_pct: f64,
    pub branch_limit_pct: f64,
    pub total_limit_pct: f64,
    pub feeder_ok: bool,
    pub branch_ok: bool,
    pub total_ok: bool,
}

impl VoltageDropCheck {
    /// Compare drops with the limits in `settings`. A missing drop passes.
    pub fn evaluate(feeder_vd_pct: Option<f64>, circuits: &[DerivedCircuit], settings: &DesignSettings) -> Self {
        let worst_branch = circuits
            .iter()
            .filter(|c| c.valid)
            .filter_map(|c| c.vd_pct)
            .reduce(f64::max);
        let total = feeder_vd_pct.unwrap_or(0.0) + worst_branch.unwrap_or(0.0);

        VoltageDropCheck {
            feeder_vd_pct,
            worst_branch_vd_pct: worst_branch,
            total_vd_pct: total,
            feeder_limit_pct: settings.feeder_vd_limit_pct,
            branch_limit_pct: settings.branch_vd_limit_pct,
            total_limit_pct: settings.total_vd_limit_pct,
            feeder_ok: feeder_vd_pct.map_or(true, |v| v <= settings.feeder_vd_limit_pct),
            branch_ok: worst_branch.map_or(true, |v| v <= settings.branch_vd_limit_pct),
            total_ok: total <= settings.total_vd_limit_pct,
        }
    }

    /// All three checks pass
    pub fn passes(&self) -> bool {
        self.feeder_ok && self.branch_ok && self.total_ok
    }
}

/// Complete distribution design for one load inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    /// Report identifier, `LIM-XXXX-YYYYMMDD-HHMMSS-mmm`
    pub folio: String,
    pub forced_mode: ForcedMode,
    /// Supply the design is built on
    pub system: SystemClass,
    /// Supply recommended from the unfiltered demand
    pub recommended: SystemClass,
    /// Demand over the whole inventory, used for the recommendation
    pub prefilter_demand: DemandSummary,
    /// Demand over the loads the supply can serve
    pub demand: DemandSummary,
    /// Installed VA by category, valid loads only
    pub loads: LoadBreakdown,
    pub feeder: FeederDesign,
    /// Every derived circuit in sequence order, invalid ones included
    pub circuits: Vec<DerivedCircuit>,
    pub balance_enabled: bool,
    pub phase_count: usize,
    pub phase_balance: Option<PhaseBalance>,
    pub ground: GroundSelection,
    pub conduits: ConduitSchedule,
    pub categories: Vec<CategorySummary>,
    pub voltage_drop: VoltageDropCheck,
    pub warnings: Vec<String>,
}

impl DesignResult {
    /// Circuits the supply can serve
    pub fn valid_circuits(&self) -> impl Iterator<Item = &DerivedCircuit> {
        self.circuits.iter().filter(|c| c.valid)
    }

    /// Look up a circuit by identity
    pub fn circuit(&self, id: CircuitId) -> Option<&DerivedCircuit> {
        self.circuits.iter().find(|c| c.id() == id)
    }
}

/// Report identifier: four random letters and the local time.
pub fn generate_folio() -> String {
    let letters: String = Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(4)
        .map(|b| char::from(b'A' + b % 26))
        .collect();
    format!("LIM-{}-{}", letters, Local::now().format("%Y%m%d-%H%M%S-%3f"))
}

/// Design with the default settings.
pub fn calculate(input: &LoadInput) -> DesignResult {
    calculate_with(input, &DesignSettings::default())
}

/// Design with the given settings.
pub fn calculate_with(input: &LoadInput, settings: &DesignSettings) -> DesignResult {
    let mode = input.forced_mode;
    let include_special = demand::includes_special_receptacles(mode);

    let installed = LoadBreakdown::from_input(input, settings, include_special, |_| true);
    let prefilter = DemandSummary::from_installed(installed.installed_va(), settings);
    let recommended = demand::recommend_system(prefilter.demand_kw, settings);
    let system = demand::resolve_system(mode, recommended);
    debug!(
        installed_va = prefilter.installed_va,
        demand_kw = prefilter.demand_kw,
        %recommended,
        %system,
        %mode,
        "classified supply"
    );

    let mut circuits = circuits::derive_circuits(input, include_special, settings);
    let mut warnings = circuits::cap_warnings(input, include_special, settings);
    let invalid = validity::apply_validity(&mut circuits, system);
    debug!(circuits = circuits.len(), invalid = invalid.len(), "derived branch circuits");
    warnings.extend(invalid);

    let loads = LoadBreakdown::from_input(input, settings, include_special, |c| {
        validity::is_valid(c, system)
    });
    let demand = DemandSummary::from_installed(loads.installed_va(), settings);

    let feeder_length = if input.feeder_length_m > 0.0 {
        input.feeder_length_m
    } else {
        settings.default_feeder_length_m
    };
    let feeder = feeder::size_feeder(system, demand.demand_va, feeder_length);
    debug!(
        demand_va = demand.demand_va,
        current_a = feeder.current_a,
        gauge = %feeder.gauge,
        breaker_a = feeder.breaker_a,
        "sized feeder"
    );

    let balance_enabled = balance::balancing_enabled(mode, recommended);
    let phase_count = if balance_enabled { system.phase_count() } else { 1 };
    let phase_balance = (balance_enabled && phase_count > 1).then(|| {
        let eligible: Vec<&DerivedCircuit> = circuits
            .iter()
            .filter(|c| balance::is_balance_eligible(c, system))
            .collect();
        balance::balance_phases(phase_count, &eligible, &input.phase_assignments)
    });
    if let Some(balance) = &phase_balance {
        debug!(
            phases = balance.phase_count,
            imbalance_pct = balance.imbalance_pct,
            "balanced phases"
        );
    }

    let ground = raceway::select_ground(feeder.breaker_a);
    let conduits = raceway::conduit_schedule(system, feeder.gauge, &circuits, &ground);
    let voltage_drop = VoltageDropCheck::evaluate(feeder.vd_pct, &circuits, settings);
    let categories = circuits::summarize(&circuits);
    debug!(
        ground = %ground.gauge,
        feeder_conduit = %conduits.feeder.label,
        vd_total_pct = voltage_drop.total_vd_pct,
        "selected raceway"
    );

    DesignResult {
        folio: generate_folio(),
        forced_mode: mode,
        system,
        recommended,
        prefilter_demand: prefilter,
        demand,
        loads,
        feeder,
        circuits,
        balance_enabled,
        phase_count,
        phase_balance,
        ground,
        conduits,
        categories,
        voltage_drop,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::ConnectionType;

    #[test]
    fn test_folio_format() {
        let folio = generate_folio();
        let parts: Vec<&str> = folio.split('-').collect();
        assert_eq!(parts.len(), 5);
        assert_eq!(parts[0], "LIM");
        assert_eq!(parts[1].len(), 4);
        assert!(parts[1].chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(parts[2].len(), 8);
        assert_eq!(parts[3].len(), 6);
        assert_eq!(parts[4].len(), 3);
    }

    #[test]
    fn test_empty_inventory() {
        let result = calculate(&LoadInput::default());
        assert!(result.circuits.is_empty());
        assert_eq!(result.demand.demand_va, 0.0);
        assert_eq!(result.system, SystemClass::SinglePhase);
        assert_eq!(result.feeder.breaker_a, 15);
        assert_eq!(result.ground.gauge, crate::tables::Gauge::Awg14);
        assert!(result.phase_balance.is_none());
        assert!(result.warnings.is_empty());
        assert!(result.voltage_drop.passes());
    }

    #[test]
    fn test_default_feeder_length() {
        let result = calculate(&LoadInput::default().with_lighting(10, 100.0));
        assert_eq!(result.feeder.length_m, 15.0);

        let mut input = LoadInput::default().with_lighting(10, 100.0);
        input.feeder_length_m = 40.0;
        assert_eq!(calculate(&input).feeder.length_m, 40.0);
    }

    #[test]
    fn test_forced_split_drops_special_receptacles() {
        let input = LoadInput::default()
            .with_special_receptacles(2)
            .with_mode(ForcedMode::Split);
        let result = calculate(&input);
        assert!(result.circuits.is_empty());
        assert_eq!(result.loads.special_receptacles_va, 0.0);
    }

    #[test]
    fn test_voltage_drop_check_flags_long_run() {
        let mut input = LoadInput::default()
            .with_specific_receptacle(3600.0, ConnectionType::SinglePhase)
            .with_mode(ForcedMode::Single);
        input.specific_lengths_m = vec![60.0].into();
        let result = calculate(&input);
        // 30 A → 10AWG: 2 × 30 × 60 × 3.6 / 1200 = 10.8%
        let vd = result.voltage_drop.worst_branch_vd_pct.unwrap();
        assert!((vd - 10.8).abs() < 1e-9);
        assert!(!result.voltage_drop.branch_ok);
        assert!(!result.voltage_drop.passes());
    }

    #[test]
    fn test_result_serializes() {
        let input = LoadInput::default()
            .with_lighting(12, 60.0)
            .with_pump(3.0, ConnectionType::SplitTwoPhase)
            .with_mode(ForcedMode::Split);
        let result = calculate(&input);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"system\":\"split-two-phase\""));
        assert!(json.contains("\"circuit\":\"lighting_0\""));
        let back: DesignResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.circuits.len(), result.circuits.len());
        assert_eq!(back.system, result.system);
        assert_eq!(back.folio, result.folio);
    }
}
