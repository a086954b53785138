//! # Demand and System Classification
//!
//! Installed VA is reduced to a demand with a single knee:
//!
//! ```text
//! demand = VA                                  VA ≤ knee
//! demand = knee + (VA − knee) · factor         VA > knee
//! ```
//!
//! The demand in kW picks the recommended supply: single-phase up to the
//! single-phase limit, split two-phase up to the split limit, three-phase
//! beyond. Classification runs once, on the unfiltered inventory; the demand
//! is then recomputed over the loads the chosen system can serve.

use serde::{Deserialize, Serialize};

use crate::input::LoadInput;
use crate::primitives::non_negative;
use crate::settings::DesignSettings;
use crate::system::{ConnectionType, ForcedMode, SystemClass};
use crate::units::{Horsepower, Kilowatts, VoltAmperes, Watts};

/// Installed VA by category
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadBreakdown {
    pub lighting_va: f64,
    pub receptacles_va: f64,
    pub special_receptacles_va: f64,
    pub pumps_va: f64,
    pub specific_receptacles_va: f64,
}

impl LoadBreakdown {
    /// Tally the inventory.
    ///
    /// Special receptacles count only when `include_special` is set. Pumps
    /// and specific receptacles count only when `accepts` admits their
    /// connection type.
    pub fn from_input(
        input: &LoadInput,
        settings: &DesignSettings,
        include_special: bool,
        accepts: impl Fn(ConnectionType) -> bool,
    ) -> Self {
        let special_count = if include_special { input.special_receptacles } else { 0 };
        LoadBreakdown {
            lighting_va: f64::from(input.fixtures) * non_negative(input.fixture_watts),
            receptacles_va: f64::from(input.receptacles) * settings.receptacle_va,
            special_receptacles_va: f64::from(special_count) * settings.special_receptacle_va,
            pumps_va: input
                .pumps
                .iter()
                .filter(|p| accepts(p.connection))
                .map(|p| Watts::from(Horsepower(non_negative(p.hp))))
                .sum::<Watts>()
                .value(),
            specific_receptacles_va: input
                .specific_receptacles
                .iter()
                .filter(|r| accepts(r.connection))
                .map(|r| non_negative(r.watts))
                .sum(),
        }
    }

    /// Total installed VA
    pub fn installed_va(&self) -> f64 {
        self.lighting_va
            + self.receptacles_va
            + self.special_receptacles_va
            + self.pumps_va
            + self.specific_receptacles_va
    }
}

/// Installed and demand power
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandSummary {
    /// Installed apparent power (VA)
    pub installed_va: f64,
    /// Demand after the demand factor (VA)
    pub demand_va: f64,
    /// Demand (kW)
    pub demand_kw: f64,
}

impl DemandSummary {
    /// Apply the demand factor to an installed load.
    pub fn from_installed(installed_va: f64, settings: &DesignSettings) -> Self {
        let demand = demand_va(installed_va, settings);
        DemandSummary {
            installed_va: non_negative(installed_va),
            demand_va: demand,
            demand_kw: Kilowatts::from(VoltAmperes(demand)).value(),
        }
    }
}

/// Demand VA after the knee.
pub fn demand_va(installed_va: f64, settings: &DesignSettings) -> f64 {
    let va = non_negative(installed_va);
    let knee = settings.demand_knee_va;
    if va <= knee {
        va
    } else {
        knee + (va - knee) * settings.demand_factor_above_knee
    }
}

/// Supply recommended for a demand in kW.
pub fn recommend_system(demand_kw: f64, settings: &DesignSettings) -> SystemClass {
    if demand_kw <= settings.single_phase_limit_kw {
        SystemClass::SinglePhase
    } else if demand_kw <= settings.split_phase_limit_kw {
        SystemClass::SplitTwoPhase
    } else {
        SystemClass::ThreePhase
    }
}

/// The forced system when one is forced, else the recommendation.
pub fn resolve_system(mode: ForcedMode, recommended: SystemClass) -> SystemClass {
    mode.forced_system().unwrap_or(recommended)
}

/// Special receptacles are only part of the design under `auto` or a forced
/// single-phase supply.
pub fn includes_special_receptacles(mode: ForcedMode) -> bool {
    matches!(mode, ForcedMode::Auto | ForcedMode::Single)
}
