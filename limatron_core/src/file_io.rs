//! # File Input
//!
//! Reads load inventories (`.json`) and design settings (`.toml`) from disk.
//!
//! ```rust,no_run
//! use limatron_core::file_io::{load_input, load_settings};
//! use std::path::Path;
//!
//! let input = load_input(Path::new("warehouse.json")).unwrap();
//! let settings = load_settings(Path::new("limatron.toml")).unwrap();
//! ```

use std::fs;
use std::path::Path;

use crate::errors::{CalcError, CalcResult};
use crate::input::LoadInput;
use crate::settings::DesignSettings;

fn read_to_string(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

/// Load a JSON load inventory.
///
/// # Errors
///
/// * `Err(CalcError::FileError)` - I/O error
/// * `Err(CalcError::SerializationError)` - Invalid JSON
pub fn load_input(path: &Path) -> CalcResult<LoadInput> {
    LoadInput::from_json(&read_to_string(path)?)
}

/// Load and validate TOML design settings.
///
/// # Errors
///
/// * `Err(CalcError::FileError)` - I/O error
/// * `Err(CalcError::ConfigError)` - Invalid TOML or unknown key
/// * `Err(CalcError::InvalidInput)` - A value out of range
pub fn load_settings(path: &Path) -> CalcResult<DesignSettings> {
    DesignSettings::from_toml_str(&read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("limatron_test_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_load_input_file() {
        let path = temp_path("input.json");
        fs::write(&path, r#"{ "fixtures": 6, "fixture_watts": 75 }"#).unwrap();
        let input = load_input(&path).unwrap();
        assert_eq!(input.fixtures, 6);
        assert_eq!(input.fixture_watts, 75.0);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_settings_file() {
        let path = temp_path("settings.toml");
        fs::write(&path, "default_feeder_length_m = 30.0\n").unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.default_feeder_length_m, 30.0);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = load_input(&temp_path("does_not_exist.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
