//! Overcurrent Protection and Equipment Grounding
//!
//! Standard breaker ratings and the equipment-ground gauge required for each
//! rating of the upstream protective device.

use crate::tables::Gauge;

/// Standard breaker ratings (A), ascending
pub const STANDARD_BREAKERS_A: [u32; 18] = [
    15, 20, 25, 30, 35, 40, 45, 50, 60, 70, 80, 90, 100, 110, 125, 150, 175, 200,
];

/// Smallest breaker the design will specify (A)
pub const MIN_BREAKER_A: u32 = 15;

/// Ground gauge by breaker rating. Ratings missing here (45, 70, 90, 110 A)
/// have no entry.
const GROUND_BY_BREAKER: [(u32, Gauge); 14] = [
    (15, Gauge::Awg14),
    (20, Gauge::Awg12),
    (25, Gauge::Awg12),
    (30, Gauge::Awg10),
    (35, Gauge::Awg10),
    (40, Gauge::Awg10),
    (50, Gauge::Awg8),
    (60, Gauge::Awg6),
    (80, Gauge::Awg4),
    (100, Gauge::Awg4),
    (125, Gauge::Awg2),
    (150, Gauge::Awg2),
    (175, Gauge::Awg2),
    (200, Gauge::Awg2),
];

/// Ground gauge tabulated for an exact breaker rating
pub fn ground_gauge_for_breaker(breaker_a: u32) -> Option<Gauge> {
    GROUND_BY_BREAKER
        .iter()
        .find(|(rating, _)| *rating == breaker_a)
        .map(|(_, gauge)| *gauge)
}

/// Ground gauge of the smallest tabulated breaker
pub fn smallest_ground_gauge() -> Gauge {
    GROUND_BY_BREAKER[0].1
}
