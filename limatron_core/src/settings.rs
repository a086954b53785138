//! # Design Settings
//!
//! Design-policy constants for a calculation: classification thresholds, the
//! demand factor, per-circuit limits, default run lengths and voltage-drop
//! limits. Every field has a default, so a settings file only needs the
//! values it changes.
//!
//! ## TOML Example
//!
//! ```toml
//! single_phase_limit_kw = 5.0
//! split_phase_limit_kw = 10.0
//! target_va_per_circuit = 1500.0
//! default_branch_length_m = 12.0
//! ```
//!
//! ```rust
//! use limatron_core::settings::DesignSettings;
//!
//! let settings = DesignSettings::from_toml_str("default_branch_length_m = 12.0").unwrap();
//! assert_eq!(settings.default_branch_length_m, 12.0);
//! assert_eq!(settings.max_fixtures_per_circuit, 12);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Design-policy constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignSettings {
    /// Demand (kW) up to which a single-phase supply is recommended
    pub single_phase_limit_kw: f64,
    /// Demand (kW) up to which a split two-phase supply is recommended
    pub split_phase_limit_kw: f64,

    /// Installed VA counted at 100% before the demand factor applies
    pub demand_knee_va: f64,
    /// Demand factor applied above the knee
    pub demand_factor_above_knee: f64,

    /// Target VA per general-purpose circuit
    pub target_va_per_circuit: f64,
    /// Maximum lighting fixtures per circuit
    pub max_fixtures_per_circuit: u32,
    /// Maximum general receptacles per circuit
    pub max_receptacles_per_circuit: u32,
    /// VA per general receptacle
    pub receptacle_va: f64,
    /// VA per special (dedicated) receptacle
    pub special_receptacle_va: f64,
    /// Most circuits derived for one category. Larger inventories still
    /// count in full toward demand, but only this many circuits are laid out
    /// and a warning is raised.
    pub max_circuits_per_category: u32,

    /// Feeder length when none is given (m)
    pub default_feeder_length_m: f64,
    /// Branch length when none is given (m)
    pub default_branch_length_m: f64,

    /// Feeder voltage-drop limit (%)
    pub feeder_vd_limit_pct: f64,
    /// Branch voltage-drop limit (%)
    pub branch_vd_limit_pct: f64,
    /// Combined feeder + branch voltage-drop limit (%)
    pub total_vd_limit_pct: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            single_phase_limit_kw: 5.0,
            split_phase_limit_kw: 10.0,
            demand_knee_va: 3000.0,
            demand_factor_above_knee: 0.35,
            target_va_per_circuit: 1500.0,
            max_fixtures_per_circuit: 12,
            max_receptacles_per_circuit: 10,
            receptacle_va: 180.0,
            special_receptacle_va: 2400.0,
            max_circuits_per_category: 1000,
            default_feeder_length_m: 15.0,
            default_branch_length_m: 10.0,
            feeder_vd_limit_pct: 2.0,
            branch_vd_limit_pct: 3.0,
            total_vd_limit_pct: 5.0,
        }
    }
}

impl DesignSettings {
    /// Parse settings from a TOML document and validate them.
    pub fn from_toml_str(s: &str) -> CalcResult<Self> {
        let settings: DesignSettings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("single_phase_limit_kw", self.single_phase_limit_kw),
            ("split_phase_limit_kw", self.split_phase_limit_kw),
            ("target_va_per_circuit", self.target_va_per_circuit),
            ("receptacle_va", self.receptacle_va),
            ("special_receptacle_va", self.special_receptacle_va),
            ("default_feeder_length_m", self.default_feeder_length_m),
            ("default_branch_length_m", self.default_branch_length_m),
            ("feeder_vd_limit_pct", self.feeder_vd_limit_pct),
            ("branch_vd_limit_pct", self.branch_vd_limit_pct),
            ("total_vd_limit_pct", self.total_vd_limit_pct),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }

        if !(self.demand_knee_va.is_finite() && self.demand_knee_va >= 0.0) {
            return Err(CalcError::invalid_input(
                "demand_knee_va",
                self.demand_knee_va.to_string(),
                "Knee cannot be negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.demand_factor_above_knee) {
            return Err(CalcError::invalid_input(
                "demand_factor_above_knee",
                self.demand_factor_above_knee.to_string(),
                "Demand factor must be between 0 and 1",
            ));
        }
        if self.split_phase_limit_kw < self.single_phase_limit_kw {
            return Err(CalcError::invalid_input(
                "split_phase_limit_kw",
                self.split_phase_limit_kw.to_string(),
                "Split-phase limit must not be below the single-phase limit",
            ));
        }
        if self.max_fixtures_per_circuit == 0 {
            return Err(CalcError::invalid_input("max_fixtures_per_circuit", "0", "Must be at least 1"));
        }
        if self.max_receptacles_per_circuit == 0 {
            return Err(CalcError::invalid_input("max_receptacles_per_circuit", "0", "Must be at least 1"));
        }
        if self.max_circuits_per_category == 0 {
            return Err(CalcError::invalid_input("max_circuits_per_category", "0", "Must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(DesignSettings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = DesignSettings::from_toml_str("target_va_per_circuit = 1800.0\n").unwrap();
        assert_eq!(settings.target_va_per_circuit, 1800.0);
        assert_eq!(settings.demand_knee_va, 3000.0);
        assert_eq!(settings.receptacle_va, 180.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = DesignSettings::from_toml_str("voltage = 127.0\n").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let err = DesignSettings::from_toml_str(
            "single_phase_limit_kw = 8.0\nsplit_phase_limit_kw = 6.0\n",
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_demand_factor_range() {
        let settings = DesignSettings {
            demand_factor_above_knee: 1.5,
            ..DesignSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_circuit_cap_must_be_positive() {
        let settings = DesignSettings::from_toml_str("max_circuits_per_category = 50\n").unwrap();
        assert_eq!(settings.max_circuits_per_category, 50);
        let err = DesignSettings::from_toml_str("max_circuits_per_category = 0\n").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
