//! # Unit Types
//!
//! Type-safe wrappers for the electrical quantities the engine aggregates.
//! These stay lightweight (just f64 wrappers) and serialize as plain numbers.
//!
//! ## Conventions
//!
//! - Power: watts (W), horsepower (HP, 1 HP = 746 W), kilowatts (kW)
//! - Apparent power: volt-amperes (VA). Loads are treated at unity power
//!   factor for demand purposes, so 1 W of installed load counts as 1 VA and
//!   the reported kW is VA / 1000.
//!
//! ## Example
//!
//! ```rust
//! use limatron_core::units::{Horsepower, Kilowatts, VoltAmperes, Watts};
//!
//! let pump = Horsepower(5.0);
//! let watts: Watts = pump.into();
//! assert_eq!(watts.0, 3730.0);
//!
//! let demand = VoltAmperes(3280.0);
//! let kw: Kilowatts = demand.into();
//! assert!((kw.0 - 3.28).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// Watts per mechanical horsepower used for pump ratings
pub const WATTS_PER_HP: f64 = 746.0;

// ============================================================================
// Power Units
// ============================================================================

/// Real power in watts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watts(pub f64);

/// Real power in kilowatts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilowatts(pub f64);

/// Mechanical rating in horsepower
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Horsepower(pub f64);

/// Apparent power in volt-amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoltAmperes(pub f64);

impl From<Horsepower> for Watts {
    fn from(hp: Horsepower) -> Self {
        Watts(hp.0 * WATTS_PER_HP)
    }
}

impl From<Watts> for VoltAmperes {
    fn from(w: Watts) -> Self {
        VoltAmperes(w.0)
    }
}

impl From<VoltAmperes> for Kilowatts {
    fn from(va: VoltAmperes) -> Self {
        Kilowatts(va.0 / 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self(0.0), |acc, x| acc + x)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Watts);
impl_arithmetic!(Kilowatts);
impl_arithmetic!(Horsepower);
impl_arithmetic!(VoltAmperes);
