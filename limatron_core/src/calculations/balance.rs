//! # Phase Balancing
//!
//! Spreads branch circuits over the supply phases. Manual assignments seed
//! the phase totals; every other eligible circuit is then placed, largest VA
//! first, on the phase with the lowest running total (ties to the lowest
//! phase number).
//!
//! ```text
//! imbalance % = (max − min) / max × 100     over positive phase totals
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::calculations::circuits::{CircuitCategory, CircuitId, DerivedCircuit};
use crate::input::PhaseOverride;
use crate::system::{ConnectionType, ForcedMode, SystemClass};

/// Phase chosen for one circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseAssignment {
    pub circuit: CircuitId,
    /// Sequence number of the circuit
    pub seq: usize,
    pub label: String,
    /// Circuit VA
    pub va: f64,
    pub connection: ConnectionType,
    /// Phase, 1-based
    pub phase: usize,
    /// Pinned by the caller rather than placed by the balancer
    pub manual: bool,
}

/// Result of a balancing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseBalance {
    /// Number of phases balanced over
    pub phase_count: usize,
    /// VA per phase, index 0 is phase 1
    pub totals_va: Vec<f64>,
    /// Spread between the heaviest and lightest loaded phase (%)
    pub imbalance_pct: f64,
    /// One entry per balanced circuit, in sequence order
    pub assignments: Vec<PhaseAssignment>,
}

impl PhaseBalance {
    /// Phase assigned to a circuit, if it was balanced
    pub fn phase_of(&self, circuit: CircuitId) -> Option<usize> {
        self.assignments
            .iter()
            .find(|a| a.circuit == circuit)
            .map(|a| a.phase)
    }
}

/// Balancing applies when the caller forces a multi-phase supply, or under
/// `auto` when the recommendation is multi-phase.
pub fn balancing_enabled(mode: ForcedMode, recommended: SystemClass) -> bool {
    match mode {
        ForcedMode::Auto => recommended != SystemClass::SinglePhase,
        ForcedMode::Single => false,
        ForcedMode::Split | ForcedMode::Three => true,
    }
}

/// Whether a circuit takes part in balancing on `system`.
///
/// Pumps and specific receptacles wired across every phase of the system
/// load all phases equally and are left out.
pub fn is_balance_eligible(circuit: &DerivedCircuit, system: SystemClass) -> bool {
    if !circuit.valid {
        return false;
    }
    if system == SystemClass::SinglePhase {
        return circuit.connection == ConnectionType::SinglePhase;
    }
    let spans_all = circuit.connection.phase_span() >= system.phase_count();
    let dedicated = matches!(
        circuit.category,
        CircuitCategory::Pumps | CircuitCategory::SpecificReceptacles
    );
    !(dedicated && spans_all)
}

/// Imbalance (%) over the positive phase totals; 0 when none is positive.
pub fn imbalance_pct(totals: &[f64]) -> f64 {
    let positive: Vec<f64> = totals.iter().copied().filter(|t| *t > 0.0).collect();
    let max = positive.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = positive.iter().copied().fold(f64::INFINITY, f64::min);
    if positive.is_empty() || max <= 0.0 {
        return 0.0;
    }
    (max - min) / max * 100.0
}

fn lightest_phase(totals: &[f64]) -> usize {
    let mut best = 0;
    for (i, total) in totals.iter().enumerate() {
        if *total < totals[best] {
            best = i;
        }
    }
    best
}

/// Balance `circuits` over `phase_count` phases.
///
/// Overrides naming a phase outside `1..=phase_count` are ignored and the
/// circuit is placed by the balancer. When the same circuit is pinned twice
/// the later override wins.
pub fn balance_phases(
    phase_count: usize,
    circuits: &[&DerivedCircuit],
    overrides: &[PhaseOverride],
) -> PhaseBalance {
    let phase_count = phase_count.max(1);
    let pinned: HashMap<CircuitId, usize> = overrides
        .iter()
        .filter(|o| (1..=phase_count).contains(&(o.phase as usize)))
        .map(|o| (o.circuit, o.phase as usize))
        .collect();

    let mut totals = vec![0.0; phase_count];
    let mut assignments = Vec::with_capacity(circuits.len());
    let mut free = Vec::new();

    for &circuit in circuits {
        match pinned.get(&circuit.id()) {
            Some(&phase) => {
                totals[phase - 1] += circuit.va;
                assignments.push(assignment(circuit, phase, true));
            }
            None => free.push(circuit),
        }
    }

    // stable: equal VA keeps sequence order
    free.sort_by(|a, b| b.va.partial_cmp(&a.va).unwrap_or(Ordering::Equal));
    for circuit in free {
        let slot = lightest_phase(&totals);
        totals[slot] += circuit.va;
        assignments.push(assignment(circuit, slot + 1, false));
    }

    assignments.sort_by_key(|a| a.seq);
    PhaseBalance {
        phase_count,
        imbalance_pct: imbalance_pct(&totals),
        totals_va: totals,
        assignments,
    }
}

fn assignment(circuit: &DerivedCircuit, phase: usize, manual: bool) -> PhaseAssignment {
    PhaseAssignment {
        circuit: circuit.id(),
        seq: circuit.seq,
        label: circuit.label.clone(),
        va: circuit.va,
        connection: circuit.connection,
        phase,
        manual,
    }
}
