//! # limatron_core - Low-Voltage Distribution Sizing Engine
//!
//! `limatron_core` sizes a low-voltage electrical distribution from a
//! facility's load inventory: it picks the supply system, derives and sizes
//! branch circuits, checks voltage drop, balances circuits across phases and
//! selects ground conductors and conduit. Inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: one pure transformation per call
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Forgiving Input**: bad numbers coerce to zero, nothing in the inventory is rejected
//! - **Table-Driven**: conductor, breaker and conduit data are read-only tables
//!
//! ## Quick Start
//!
//! ```rust
//! use limatron_core::{calculate, LoadInput};
//! use limatron_core::system::{ConnectionType, ForcedMode, SystemClass};
//!
//! let input = LoadInput::default()
//!     .with_pump(5.0, ConnectionType::ThreePhase)
//!     .with_mode(ForcedMode::Three);
//!
//! let result = calculate(&input);
//! assert_eq!(result.system, SystemClass::ThreePhase);
//! assert!((result.circuits[0].current_a - 11.38).abs() < 0.01);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("\"folio\""));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Demand, circuits, validity, balancing, raceway and the `calculate` entry point
//! - [`primitives`] - Current, gauge, breaker, voltage-drop and conduit-fill functions
//! - [`tables`] - Conductor, conduit, impedance and protection tables
//! - [`equations`] - Voltage-drop formulas
//! - [`system`] - Connection types, supply systems and forced modes
//! - [`input`] - The load inventory payload
//! - [`settings`] - Design-policy constants
//! - [`units`] - Type-safe power units
//! - [`errors`] - Structured error types
//! - [`file_io`] - Reading inventories and settings from disk

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod input;
pub mod primitives;
pub mod settings;
pub mod system;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, calculate_with, DesignResult};
pub use errors::{CalcError, CalcResult};
pub use input::LoadInput;
pub use settings::DesignSettings;
