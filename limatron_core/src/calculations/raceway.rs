//! # Raceway and Grounding
//!
//! Sizes the equipment-ground conductor from the feeder breaker, then picks a
//! conduit for the feeder and for each branch module.
//!
//! | Module              | Conductors                       |
//! |---------------------|----------------------------------|
//! | feeder              | feeder count − 1, feeder gauge   |
//! | each branch module  | 2, category gauge                |
//!
//! Every run adds one ground conductor.

use serde::{Deserialize, Serialize};

use crate::calculations::circuits::{CircuitCategory, DerivedCircuit};
use crate::primitives::{select_breaker, select_conduit, ConduitSelection};
use crate::system::SystemClass;
use crate::tables::{ground_gauge_for_breaker, smallest_ground_gauge, Gauge};

/// Current-carrying conductors in a branch module run
const BRANCH_CONDUCTORS: usize = 2;

/// Equipment-ground conductor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundSelection {
    /// Breaker rating the ground was looked up for (A)
    pub breaker_a: u32,
    pub gauge: Gauge,
    /// Conductor area (mm²)
    pub area_mm2: f64,
}

/// Ground gauge for the feeder breaker.
///
/// The rating is first rounded up to a standard breaker; ratings with no
/// tabulated ground fall back to the smallest entry.
pub fn select_ground(feeder_breaker_a: u32) -> GroundSelection {
    let breaker = select_breaker(f64::from(feeder_breaker_a));
    let gauge = ground_gauge_for_breaker(breaker).unwrap_or_else(smallest_ground_gauge);
    GroundSelection {
        breaker_a: breaker,
        gauge,
        area_mm2: gauge.area_mm2(),
    }
}

/// Conduit for every module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitSchedule {
    pub feeder: ConduitSelection,
    pub lighting: ConduitSelection,
    pub receptacles: ConduitSelection,
    pub special_receptacles: ConduitSelection,
    pub pumps: ConduitSelection,
    pub specific_receptacles: ConduitSelection,
}

impl ConduitSchedule {
    /// Modules with their labels, feeder first
    pub fn modules(&self) -> [(&'static str, &ConduitSelection); 6] {
        [
            ("Feeder", &self.feeder),
            (CircuitCategory::Lighting.label(), &self.lighting),
            (CircuitCategory::Receptacles.label(), &self.receptacles),
            (CircuitCategory::SpecialReceptacles.label(), &self.special_receptacles),
            (CircuitCategory::Pumps.label(), &self.pumps),
            (CircuitCategory::SpecificReceptacles.label(), &self.specific_receptacles),
        ]
    }
}

/// Gauge of the first circuit of `category`, else `fallback`.
fn category_gauge(circuits: &[DerivedCircuit], category: CircuitCategory, fallback: Gauge) -> Gauge {
    circuits
        .iter()
        .find(|c| c.category == category)
        .and_then(|c| c.gauge)
        .unwrap_or(fallback)
}

/// Conduit schedule for the feeder and each branch module.
pub fn conduit_schedule(
    system: SystemClass,
    feeder_gauge: Gauge,
    circuits: &[DerivedCircuit],
    ground: &GroundSelection,
) -> ConduitSchedule {
    let ground_gauge = Some(ground.gauge);
    let branch = |category| {
        select_conduit(
            BRANCH_CONDUCTORS,
            Some(category_gauge(circuits, category, feeder_gauge)),
            ground_gauge,
        )
    };

    ConduitSchedule {
        feeder: select_conduit(
            system.feeder_conductor_count() - 1,
            Some(feeder_gauge),
            ground_gauge,
        ),
        lighting: branch(CircuitCategory::Lighting),
        receptacles: branch(CircuitCategory::Receptacles),
        special_receptacles: branch(CircuitCategory::SpecialReceptacles),
        pumps: branch(CircuitCategory::Pumps),
        specific_receptacles: branch(CircuitCategory::SpecificReceptacles),
    }
}
