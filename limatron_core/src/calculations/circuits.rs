//! # Branch Circuit Derivation
//!
//! Turns the load inventory into individual branch circuits.
//!
//! ## Groupable Categories
//!
//! Lighting and general receptacles are grouped. The circuit count is the
//! larger of the item-count rule and the VA rule:
//!
//! ```text
//! n = max(⌈items / max_per_circuit⌉, ⌈category_VA / target_VA⌉, 1)
//! ```
//!
//! (0 when the category has neither items nor VA). Items are split as evenly
//! as possible, the remainder going one at a time to the earliest circuits.
//! All circuits of a category share the gauge sized for the worst-case
//! current; breaker and voltage drop follow each circuit's own current and
//! run length.
//!
//! ## Dedicated Categories
//!
//! Special receptacles, pumps and specific receptacles get one circuit per
//! unit, sized from the unit's own power and connection type.
//!
//! ## Circuit Cap
//!
//! No category lays out more than `max_circuits_per_category` circuits. A
//! capped grouped category spreads all of its items over the capped
//! circuits; a capped dedicated category sizes only its first units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::errors::{CalcError, CalcResult};
use crate::input::{LoadInput, RunLengths};
use crate::primitives::{
    branch_breaker, branch_voltage_drop, current_for, non_negative, select_gauge,
};
use crate::settings::DesignSettings;
use crate::system::ConnectionType;
use crate::tables::Gauge;
use crate::units::{Horsepower, Watts};

// ============================================================================
// Categories and identity
// ============================================================================

/// Source category of a branch circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitCategory {
    /// Lighting fixtures, grouped
    Lighting,
    /// General-purpose receptacles, grouped
    Receptacles,
    /// Fixed-VA dedicated receptacles
    SpecialReceptacles,
    /// Pumps, one circuit each
    Pumps,
    /// Appliance-specific receptacles, one circuit each
    SpecificReceptacles,
}

impl CircuitCategory {
    /// All categories in derivation order
    pub const ALL: [CircuitCategory; 5] = [
        CircuitCategory::Lighting,
        CircuitCategory::Receptacles,
        CircuitCategory::SpecialReceptacles,
        CircuitCategory::Pumps,
        CircuitCategory::SpecificReceptacles,
    ];

    /// Stable key used in circuit identities
    pub fn key(&self) -> &'static str {
        match self {
            CircuitCategory::Lighting => "lighting",
            CircuitCategory::Receptacles => "receptacles",
            CircuitCategory::SpecialReceptacles => "special_receptacles",
            CircuitCategory::Pumps => "pumps",
            CircuitCategory::SpecificReceptacles => "specific_receptacles",
        }
    }

    /// Label for listings
    pub fn label(&self) -> &'static str {
        match self {
            CircuitCategory::Lighting => "Lighting",
            CircuitCategory::Receptacles => "Receptacles",
            CircuitCategory::SpecialReceptacles => "Special receptacle",
            CircuitCategory::Pumps => "Pump",
            CircuitCategory::SpecificReceptacles => "Specific receptacle",
        }
    }

    /// One circuit per unit rather than grouped
    pub fn is_dedicated(&self) -> bool {
        !matches!(self, CircuitCategory::Lighting | CircuitCategory::Receptacles)
    }
}

impl FromStr for CircuitCategory {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        CircuitCategory::ALL
            .iter()
            .copied()
            .find(|c| c.key() == s)
            .ok_or_else(|| CalcError::invalid_input("category", s, "Unknown circuit category"))
    }
}

/// Identity of a circuit: category key plus 0-based index, `lighting_0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CircuitId {
    pub category: CircuitCategory,
    pub index: usize,
}

impl CircuitId {
    /// Create a circuit identity
    pub fn new(category: CircuitCategory, index: usize) -> Self {
        CircuitId { category, index }
    }
}

impl fmt::Display for CircuitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.category.key(), self.index)
    }
}

impl FromStr for CircuitId {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        let s = s.trim();
        let (key, index) = s
            .rsplit_once('_')
            .ok_or_else(|| CalcError::invalid_input("circuit", s, "Expected <category>_<index>"))?;
        let index = index
            .parse::<usize>()
            .map_err(|_| CalcError::invalid_input("circuit", s, "Index must be a whole number"))?;
        Ok(CircuitId::new(key.parse()?, index))
    }
}

impl Serialize for CircuitId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CircuitId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Derived circuit record
// ============================================================================

/// One sized branch circuit.
///
/// ## JSON Example
///
/// ```json
/// {
///   "seq": 1,
///   "label": "Lighting",
///   "category": "lighting",
///   "index": 0,
///   "items": 10,
///   "rating_hp": null,
///   "va": 1000.0,
///   "current_a": 8.33,
///   "gauge": "14AWG",
///   "breaker_a": 15,
///   "length_m": 10.0,
///   "vd_pct": 1.24,
///   "connection": "single-phase",
///   "valid": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedCircuit {
    /// 1-based position across all categories
    pub seq: usize,
    /// Category label
    pub label: String,
    /// Source category
    pub category: CircuitCategory,
    /// 0-based index within the category
    pub index: usize,
    /// Items served (grouped categories only)
    pub items: Option<u32>,
    /// Motor rating (pumps only)
    pub rating_hp: Option<f64>,
    /// Apparent power (VA)
    pub va: f64,
    /// Current (A)
    pub current_a: f64,
    /// Conductor gauge
    pub gauge: Option<Gauge>,
    /// Breaker rating (A)
    pub breaker_a: u32,
    /// Run length (m)
    pub length_m: f64,
    /// Voltage drop (%)
    pub vd_pct: Option<f64>,
    /// Load wiring
    pub connection: ConnectionType,
    /// Connection is compatible with the supply system
    pub valid: bool,
}

impl DerivedCircuit {
    /// Identity of this circuit
    pub fn id(&self) -> CircuitId {
        CircuitId::new(self.category, self.index)
    }
}

// ============================================================================
// Counting rules
// ============================================================================

/// Number of circuits for a groupable category.
pub fn circuits_for(items: u32, max_per_circuit: u32, total_va: f64, target_va: f64) -> usize {
    let by_count = if items > 0 {
        items.div_ceil(max_per_circuit.max(1)) as usize
    } else {
        0
    };
    let total_va = non_negative(total_va);
    let by_va = if total_va > 0.0 && target_va > 0.0 {
        (total_va / target_va).ceil() as usize
    } else {
        0
    };
    if by_count == 0 && by_va == 0 {
        return 0;
    }
    by_count.max(by_va).max(1)
}

/// Split `items` across `n` circuits, remainder to the earliest circuits.
pub fn split_count(items: u32, n: usize) -> Vec<u32> {
    if n == 0 {
        return Vec::new();
    }
    let n32 = u32::try_from(n).unwrap_or(u32::MAX);
    let base = items / n32;
    let remainder = (items % n32) as usize;
    (0..n)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

// ============================================================================
// Derivation
// ============================================================================

/// A single dedicated load before sizing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DedicatedLoad {
    pub va: f64,
    pub connection: ConnectionType,
    pub rating_hp: Option<f64>,
}

fn circuit(
    category: CircuitCategory,
    index: usize,
    va: f64,
    current_a: f64,
    gauge: Option<Gauge>,
    length_m: f64,
    connection: ConnectionType,
) -> DerivedCircuit {
    DerivedCircuit {
        seq: 0,
        label: category.label().to_string(),
        category,
        index,
        items: None,
        rating_hp: None,
        va,
        current_a,
        gauge,
        breaker_a: branch_breaker(current_a),
        length_m,
        vd_pct: branch_voltage_drop(current_a, length_m, gauge, connection),
        connection,
        valid: true,
    }
}

/// Derive the single-phase circuits of a grouped category.
pub fn derive_grouped(
    category: CircuitCategory,
    items: u32,
    unit_va: f64,
    max_per_circuit: u32,
    lengths: &RunLengths,
    settings: &DesignSettings,
) -> Vec<DerivedCircuit> {
    let unit_va = non_negative(unit_va);
    let total_va = f64::from(items) * unit_va;
    let n = circuits_for(items, max_per_circuit, total_va, settings.target_va_per_circuit)
        .min(settings.max_circuits_per_category as usize);
    let counts = split_count(items, n);
    let lengths = lengths.resolve(n, settings.default_branch_length_m);

    let currents: Vec<f64> = counts
        .iter()
        .map(|&c| current_for(f64::from(c) * unit_va, ConnectionType::SinglePhase))
        .collect();
    let worst = currents.iter().copied().fold(0.0, f64::max);
    let gauge = (worst > 0.0).then(|| select_gauge(worst));

    counts
        .iter()
        .zip(currents)
        .zip(lengths)
        .enumerate()
        .map(|(i, ((&count, current), length))| {
            let mut c = circuit(
                category,
                i,
                f64::from(count) * unit_va,
                current,
                gauge,
                length,
                ConnectionType::SinglePhase,
            );
            c.items = Some(count);
            c
        })
        .collect()
}

/// Derive one circuit per dedicated load.
pub fn derive_dedicated(
    category: CircuitCategory,
    loads: &[DedicatedLoad],
    lengths: &RunLengths,
    settings: &DesignSettings,
) -> Vec<DerivedCircuit> {
    let loads = &loads[..loads.len().min(settings.max_circuits_per_category as usize)];
    let lengths = lengths.resolve(loads.len(), settings.default_branch_length_m);
    loads
        .iter()
        .zip(lengths)
        .enumerate()
        .map(|(i, (load, length))| {
            let va = non_negative(load.va);
            let current = current_for(va, load.connection);
            let mut c = circuit(
                category,
                i,
                va,
                current,
                Some(select_gauge(current)),
                length,
                load.connection,
            );
            c.rating_hp = load.rating_hp;
            c
        })
        .collect()
}

/// Pump loads with their rated power
pub fn pump_loads(input: &LoadInput) -> Vec<DedicatedLoad> {
    input
        .pumps
        .iter()
        .map(|p| {
            let hp = non_negative(p.hp);
            DedicatedLoad {
                va: Watts::from(Horsepower(hp)).value(),
                connection: p.connection,
                rating_hp: Some(hp),
            }
        })
        .collect()
}

/// Specific receptacle loads
pub fn specific_loads(input: &LoadInput) -> Vec<DedicatedLoad> {
    input
        .specific_receptacles
        .iter()
        .map(|r| DedicatedLoad {
            va: non_negative(r.watts),
            connection: r.connection,
            rating_hp: None,
        })
        .collect()
}

/// Derive every branch circuit, numbered in category order.
///
/// Special receptacles are only derived when `include_special` is set.
/// Every record starts out valid; the validity filter marks the rest.
pub fn derive_circuits(
    input: &LoadInput,
    include_special: bool,
    settings: &DesignSettings,
) -> Vec<DerivedCircuit> {
    let specials = if include_special {
        vec![
            DedicatedLoad {
                va: settings.special_receptacle_va,
                connection: ConnectionType::SinglePhase,
                rating_hp: None,
            };
            input.special_receptacles.min(settings.max_circuits_per_category) as usize
        ]
    } else {
        Vec::new()
    };

    let mut circuits = derive_grouped(
        CircuitCategory::Lighting,
        input.fixtures,
        input.fixture_watts,
        settings.max_fixtures_per_circuit,
        &input.lighting_lengths_m,
        settings,
    );
    circuits.extend(derive_grouped(
        CircuitCategory::Receptacles,
        input.receptacles,
        settings.receptacle_va,
        settings.max_receptacles_per_circuit,
        &input.receptacle_lengths_m,
        settings,
    ));
    circuits.extend(derive_dedicated(
        CircuitCategory::SpecialReceptacles,
        &specials,
        &input.special_lengths_m,
        settings,
    ));
    circuits.extend(derive_dedicated(
        CircuitCategory::Pumps,
        &pump_loads(input),
        &input.pump_lengths_m,
        settings,
    ));
    circuits.extend(derive_dedicated(
        CircuitCategory::SpecificReceptacles,
        &specific_loads(input),
        &input.specific_lengths_m,
        settings,
    ));

    for (i, c) in circuits.iter_mut().enumerate() {
        c.seq = i + 1;
    }
    circuits
}

/// Circuits a category would need without the cap.
pub fn uncapped_count(
    category: CircuitCategory,
    input: &LoadInput,
    include_special: bool,
    settings: &DesignSettings,
) -> usize {
    if category.is_dedicated() {
        return match category {
            CircuitCategory::SpecialReceptacles if include_special => input.special_receptacles as usize,
            CircuitCategory::Pumps => input.pumps.len(),
            CircuitCategory::SpecificReceptacles => input.specific_receptacles.len(),
            _ => 0,
        };
    }
    let (items, unit_va, max_per_circuit) = match category {
        CircuitCategory::Lighting => (input.fixtures, input.fixture_watts, settings.max_fixtures_per_circuit),
        _ => (input.receptacles, settings.receptacle_va, settings.max_receptacles_per_circuit),
    };
    let total_va = f64::from(items) * non_negative(unit_va);
    circuits_for(items, max_per_circuit, total_va, settings.target_va_per_circuit)
}

/// One warning per category whose circuit count was capped.
pub fn cap_warnings(input: &LoadInput, include_special: bool, settings: &DesignSettings) -> Vec<String> {
    let cap = settings.max_circuits_per_category as usize;
    CircuitCategory::ALL
        .iter()
        .filter_map(|&category| {
            let needed = uncapped_count(category, input, include_special, settings);
            (needed > cap).then(|| {
                let message = format!(
                    "{} needs {} circuits; only the first {} are laid out",
                    category.label(),
                    needed,
                    cap
                );
                warn!(category = category.key(), needed, cap, "{}", message);
                message
            })
        })
        .collect()
}

// ============================================================================
// Category summaries
// ============================================================================

/// Roll-up of one category's circuits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: CircuitCategory,
    pub label: String,
    /// Number of circuits
    pub circuits: usize,
    /// Total VA of the category
    pub total_va: f64,
    /// Highest circuit current (A)
    pub worst_current_a: f64,
    /// Gauge of the first circuit (shared for grouped categories)
    pub gauge: Option<Gauge>,
    /// Highest circuit voltage drop (%)
    pub worst_vd_pct: Option<f64>,
    /// Mean voltage drop over circuits that have one (%)
    pub mean_vd_pct: Option<f64>,
}

/// Summaries for every category that produced at least one circuit.
pub fn summarize(circuits: &[DerivedCircuit]) -> Vec<CategorySummary> {
    CircuitCategory::ALL
        .iter()
        .filter_map(|&category| {
            let members: Vec<&DerivedCircuit> =
                circuits.iter().filter(|c| c.category == category).collect();
            let first = members.first()?;
            let drops: Vec<f64> = members.iter().filter_map(|c| c.vd_pct).collect();
            Some(CategorySummary {
                category,
                label: category.label().to_string(),
                circuits: members.len(),
                total_va: members.iter().map(|c| c.va).sum(),
                worst_current_a: members.iter().map(|c| c.current_a).fold(0.0, f64::max),
                gauge: first.gauge,
                worst_vd_pct: drops.iter().copied().reduce(f64::max),
                mean_vd_pct: (!drops.is_empty()).then(|| drops.iter().sum::<f64>() / drops.len() as f64),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuits_for_rules() {
        // 20 fixtures / 12 per circuit = 2; 2000 VA / 1500 = 2
        assert_eq!(circuits_for(20, 12, 2000.0, 1500.0), 2);
        // 10 receptacles / 10 = 1; 1800 VA / 1500 = 2 (VA rule governs)
        assert_eq!(circuits_for(10, 10, 1800.0, 1500.0), 2);
        // fixtures without wattage still need circuits by count
        assert_eq!(circuits_for(25, 12, 0.0, 1500.0), 3);
        assert_eq!(circuits_for(0, 12, 0.0, 1500.0), 0);
        assert_eq!(circuits_for(1, 12, 10.0, 1500.0), 1);
    }

    #[test]
    fn test_split_count_remainder() {
        assert_eq!(split_count(20, 2), vec![10, 10]);
        assert_eq!(split_count(25, 3), vec![9, 8, 8]);
        assert_eq!(split_count(7, 4), vec![2, 2, 2, 1]);
        assert_eq!(split_count(2, 3), vec![1, 1, 0]);
        assert!(split_count(5, 0).is_empty());
    }

    #[test]
    fn test_split_count_conserves_items() {
        for items in 0..60u32 {
            for n in 1..9usize {
                let parts = split_count(items, n);
                assert_eq!(parts.len(), n);
                assert_eq!(parts.iter().sum::<u32>(), items);
                let max = *parts.iter().max().unwrap();
                let min = *parts.iter().min().unwrap();
                assert!(max - min <= 1);
            }
        }
    }

    #[test]
    fn test_grouped_shares_worst_gauge() {
        let settings = DesignSettings::default();
        // 25 fixtures at 60 W → 3 circuits of 9/8/8 fixtures
        let lengths = RunLengths::from(vec![30.0]);
        let circuits = derive_grouped(CircuitCategory::Lighting, 25, 60.0, 12, &lengths, &settings);
        assert_eq!(circuits.len(), 3);
        assert_eq!(circuits[0].items, Some(9));
        assert!((circuits[0].va - 540.0).abs() < 1e-9);
        assert!((circuits[1].current_a - 4.0).abs() < 1e-9);
        assert!(circuits.iter().all(|c| c.gauge == Some(Gauge::Awg14)));

        // own length per circuit
        assert_eq!(circuits[0].length_m, 30.0);
        assert_eq!(circuits[1].length_m, 10.0);
        assert!(circuits[0].vd_pct.unwrap() > circuits[1].vd_pct.unwrap());
    }

    #[test]
    fn test_grouped_breaker_per_circuit() {
        let settings = DesignSettings {
            target_va_per_circuit: 10_000.0,
            ..DesignSettings::default()
        };
        // 13 fixtures at 120 W, 12 per circuit → 7 + 6 fixtures
        // 840 W → 7 A, 720 W → 6 A; both 15 A
        let circuits = derive_grouped(CircuitCategory::Lighting, 13, 120.0, 12, &RunLengths::default(), &settings);
        assert_eq!(circuits.len(), 2);
        assert_eq!(circuits[0].items, Some(7));
        assert_eq!(circuits[1].items, Some(6));
        assert_eq!(circuits[0].breaker_a, 15);

        // 11 receptacles, 10 per circuit → 6 + 5 at 300 VA: 15 A and 12.5 A
        let circuits = derive_grouped(CircuitCategory::Receptacles, 11, 300.0, 10, &RunLengths::default(), &settings);
        assert_eq!(circuits[0].breaker_a, 20);
        assert_eq!(circuits[1].breaker_a, 20);
        assert_eq!(circuits[0].gauge, Some(Gauge::Awg14));
    }

    #[test]
    fn test_grouped_zero_wattage_has_no_gauge() {
        let settings = DesignSettings::default();
        let circuits = derive_grouped(CircuitCategory::Lighting, 5, 0.0, 12, &RunLengths::default(), &settings);
        assert_eq!(circuits.len(), 1);
        assert_eq!(circuits[0].gauge, None);
        assert_eq!(circuits[0].vd_pct, None);
        assert_eq!(circuits[0].breaker_a, 15);
    }

    #[test]
    fn test_dedicated_sized_individually() {
        let settings = DesignSettings::default();
        let loads = [
            DedicatedLoad { va: 4000.0, connection: ConnectionType::SinglePhase, rating_hp: None },
            DedicatedLoad { va: 4000.0, connection: ConnectionType::ThreePhase, rating_hp: None },
            DedicatedLoad { va: 0.0, connection: ConnectionType::SinglePhase, rating_hp: None },
        ];
        let circuits = derive_dedicated(CircuitCategory::SpecificReceptacles, &loads, &RunLengths::default(), &settings);
        // 4000 / 120 = 33.3 A → 8AWG, 50 A
        assert_eq!(circuits[0].gauge, Some(Gauge::Awg8));
        assert_eq!(circuits[0].breaker_a, 50);
        // 4000 / 327.7 = 12.2 A → 14AWG, 20 A
        assert_eq!(circuits[1].gauge, Some(Gauge::Awg14));
        assert_eq!(circuits[1].breaker_a, 20);
        // zero load still gets the smallest gauge, but no voltage drop
        assert_eq!(circuits[2].gauge, Some(Gauge::Awg14));
        assert_eq!(circuits[2].vd_pct, None);
        assert!(circuits.iter().all(|c| c.items.is_none()));
    }

    #[test]
    fn test_derive_sequence_and_special_gate() {
        let settings = DesignSettings::default();
        let input = LoadInput::default()
            .with_lighting(20, 100.0)
            .with_special_receptacles(2)
            .with_pump(1.0, ConnectionType::SinglePhase);

        let with = derive_circuits(&input, true, &settings);
        let seqs: Vec<usize> = with.iter().map(|c| c.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4, 5]);
        assert_eq!(with[2].category, CircuitCategory::SpecialReceptacles);
        assert!((with[2].va - 2400.0).abs() < 1e-9);
        assert_eq!(with[4].rating_hp, Some(1.0));
        assert!((with[4].va - 746.0).abs() < 1e-9);

        let without = derive_circuits(&input, false, &settings);
        assert_eq!(without.len(), 3);
        assert!(without.iter().all(|c| c.category != CircuitCategory::SpecialReceptacles));
    }

    #[test]
    fn test_huge_counts_are_capped() {
        let settings = DesignSettings::default();
        let input = LoadInput::default()
            .with_lighting(u32::MAX, 100.0)
            .with_special_receptacles(u32::MAX)
            .with_pump(1.0, ConnectionType::SinglePhase);

        let circuits = derive_circuits(&input, true, &settings);
        let lighting: Vec<&DerivedCircuit> =
            circuits.iter().filter(|c| c.category == CircuitCategory::Lighting).collect();
        assert_eq!(lighting.len(), 1000);
        // every fixture is still served
        let served: u64 = lighting.iter().filter_map(|c| c.items).map(u64::from).sum();
        assert_eq!(served, u64::from(u32::MAX));
        let specials = circuits
            .iter()
            .filter(|c| c.category == CircuitCategory::SpecialReceptacles)
            .count();
        assert_eq!(specials, 1000);
        assert_eq!(circuits.len(), 2001);

        let warnings = cap_warnings(&input, true, &settings);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("Lighting"));
        assert!(warnings[1].starts_with("Special receptacle"));
        // specials excluded from the design raise nothing
        assert_eq!(cap_warnings(&input, false, &settings).len(), 1);
    }

    #[test]
    fn test_dedicated_cap_keeps_first_units() {
        let settings = DesignSettings {
            max_circuits_per_category: 2,
            ..DesignSettings::default()
        };
        let input = LoadInput::default()
            .with_pump(1.0, ConnectionType::SinglePhase)
            .with_pump(2.0, ConnectionType::SinglePhase)
            .with_pump(3.0, ConnectionType::SinglePhase);
        let circuits = derive_circuits(&input, true, &settings);
        assert_eq!(circuits.len(), 2);
        assert_eq!(circuits[1].rating_hp, Some(2.0));
        assert_eq!(uncapped_count(CircuitCategory::Pumps, &input, true, &settings), 3);
        assert_eq!(cap_warnings(&input, true, &settings).len(), 1);
        assert!(cap_warnings(&input, true, &DesignSettings::default()).is_empty());
    }

    #[test]
    fn test_circuit_id_round_trip_through_string() {
        let id: CircuitId = "special_receptacles_12".parse().unwrap();
        assert_eq!(id, CircuitId::new(CircuitCategory::SpecialReceptacles, 12));
        assert_eq!(id.to_string(), "special_receptacles_12");
        assert!("lighting".parse::<CircuitId>().is_err());
        assert!("lighting_x".parse::<CircuitId>().is_err());
        assert!("boilers_0".parse::<CircuitId>().is_err());
    }

    #[test]
    fn test_summaries() {
        let settings = DesignSettings::default();
        let input = LoadInput::default().with_lighting(20, 100.0).with_receptacles(10);
        let circuits = derive_circuits(&input, true, &settings);
        let summaries = summarize(&circuits);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].category, CircuitCategory::Lighting);
        assert_eq!(summaries[0].circuits, 2);
        assert!((summaries[0].total_va - 2000.0).abs() < 1e-9);
        assert!((summaries[1].worst_current_a - 7.5).abs() < 1e-9);
        assert!(summaries[1].mean_vd_pct.is_some());
    }
}
