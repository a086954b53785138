//! # Conductor and Equipment Tables
//!
//! Read-only lookup data for sizing: conductor ampacity, impedance and area,
//! conduit internal area, standard breaker ratings and equipment-ground
//! gauges. Nothing here mutates; lookups that miss return `None`.
//!
//! ## Example
//!
//! ```rust
//! use limatron_core::tables::{Gauge, ConduitSize, ground_gauge_for_breaker};
//!
//! assert_eq!(Gauge::Awg12.ampacity_a(), 20.0);
//! assert_eq!(ConduitSize::Half.internal_area_mm2(), 176.0);
//! assert_eq!(ground_gauge_for_breaker(60), Some(Gauge::Awg6));
//! ```

pub mod conductors;
pub mod conduit;
pub mod feeder_impedance;
pub mod protection;

pub use conductors::Gauge;
pub use conduit::ConduitSize;
pub use feeder_impedance::{feeder_impedance_ohm_km, normalize_size_key};
pub use protection::{
    ground_gauge_for_breaker, smallest_ground_gauge, MIN_BREAKER_A, STANDARD_BREAKERS_A,
};

/// NOM-001-SEDE-2012 table references for the tabulated data.
pub mod nom_ref {
    /// Conductor ampacity
    pub const AMPACITY: &str = "NOM-001-SEDE-2012 Tabla 310-15(b)(16)";
    /// Conductor and conduit dimensions
    pub const CONDUIT_FILL: &str = "NOM-001-SEDE-2012 Capítulo 10, Tabla 9";
    /// Branch-circuit ratings
    pub const BRANCH_RATINGS: &str = "NOM-001-SEDE-2012 Tabla 210-24";
    /// Equipment grounding conductor size
    pub const GROUND: &str = "NOM-001-SEDE-2012 Tabla 250-122";
}
