//! Feeder Impedance Table
//!
//! Effective impedance of copper conductors in PVC conduit at PF ≈ 0.85
//! (60 Hz, 75 °C), covering AWG sizes 14 through 4/0 and kcmil sizes 250
//! through 1000. Only the feeder voltage drop reads this table.
//!
//! Note that it is not the branch table in [`super::conductors`]: 12, 6, 4
//! and 2 AWG carry different values here. Both tables are kept as tabulated.
//!
//! ## Size Keys
//!
//! Sizes are looked up by a normalized key: `"14"`..`"1"` for AWG,
//! `"1/0"`..`"4/0"` for aught sizes and `"250"`..`"1000"` for kcmil.
//! [`normalize_size_key`] accepts the usual spellings:
//!
//! ```rust
//! use limatron_core::tables::feeder_impedance::{normalize_size_key, feeder_impedance_ohm_km};
//!
//! assert_eq!(normalize_size_key("1/0 AWG").as_deref(), Some("1/0"));
//! assert_eq!(normalize_size_key("500 kcmil").as_deref(), Some("500"));
//! assert_eq!(feeder_impedance_ohm_km("12AWG"), Some(6.30));
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;

static FEEDER_Z_CU_PVC: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        // AWG
        ("14", 8.90),
        ("12", 6.30),
        ("10", 3.60),
        ("8", 2.26),
        ("6", 1.48),
        ("4", 0.98),
        ("3", 0.79),
        ("2", 0.62),
        ("1", 0.52),
        ("1/0", 0.43),
        ("2/0", 0.36),
        ("3/0", 0.33),
        ("4/0", 0.30),
        // kcmil
        ("250", 0.262),
        ("300", 0.240),
        ("350", 0.222),
        ("400", 0.210),
        ("500", 0.187),
        ("600", 0.171),
        ("750", 0.148),
        ("1000", 0.128),
    ])
});

fn is_digits(s: &str, min_len: usize, max_len: usize) -> bool {
    (min_len..=max_len).contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit())
}

fn is_aught(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 3 && (b'1'..=b'4').contains(&bytes[0]) && &bytes[1..] == b"/0"
}

/// Normalize a conductor size designation to a table key.
///
/// Case and whitespace are ignored; `MCM` is read as `KCMIL`. Returns `None`
/// for anything that is not a recognizable AWG, aught or kcmil size.
pub fn normalize_size_key(raw: &str) -> Option<String> {
    let mut s: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    if s.is_empty() {
        return None;
    }
    if let Some(stem) = s.strip_suffix("MCM") {
        s = format!("{stem}KCMIL");
    }

    if let Some(stem) = s.strip_suffix("KCMIL") {
        return is_digits(stem, 2, 4).then(|| stem.to_string());
    }

    match s.strip_suffix("AWG") {
        Some(stem) if is_aught(stem) || is_digits(stem, 1, 2) => Some(stem.to_string()),
        Some(_) => None,
        // Bare designations: aught sizes, or 2-4 digit numbers
        None if is_aught(&s) || is_digits(&s, 2, 4) => Some(s),
        None => None,
    }
}

/// Feeder impedance (Ω/km) for a size designation, `None` when the size
/// cannot be normalized or is not tabulated.
pub fn feeder_impedance_ohm_km(size: &str) -> Option<f64> {
    let key = normalize_size_key(size)?;
    FEEDER_Z_CU_PVC.get(key.as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_awg() {
        assert_eq!(normalize_size_key("14AWG").as_deref(), Some("14"));
        assert_eq!(normalize_size_key("2 awg").as_deref(), Some("2"));
        assert_eq!(normalize_size_key(" 10 AWG ").as_deref(), Some("10"));
    }

    #[test]
    fn test_normalize_aught_and_kcmil() {
        assert_eq!(normalize_size_key("1 / 0 AWG").as_deref(), Some("1/0"));
        assert_eq!(normalize_size_key("4/0").as_deref(), Some("4/0"));
        assert_eq!(normalize_size_key("250KCMIL").as_deref(), Some("250"));
        assert_eq!(normalize_size_key("350 mcm").as_deref(), Some("350"));
        assert_eq!(normalize_size_key("1000").as_deref(), Some("1000"));
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(normalize_size_key(""), None);
        assert_eq!(normalize_size_key("8"), None);
        assert_eq!(normalize_size_key("5/0 AWG"), None);
        assert_eq!(normalize_size_key("twelve"), None);
        assert_eq!(normalize_size_key("12345KCMIL"), None);
    }

    #[test]
    fn test_feeder_table_differs_from_branch_table() {
        use crate::tables::Gauge;

        let feeder = feeder_impedance_ohm_km(Gauge::Awg12.display_name()).unwrap();
        assert!((feeder - 6.30).abs() < 1e-9);
        assert!((Gauge::Awg12.branch_impedance_ohm_km() - 5.60).abs() < 1e-9);

        let same = feeder_impedance_ohm_km(Gauge::Awg10.display_name()).unwrap();
        assert!((same - Gauge::Awg10.branch_impedance_ohm_km()).abs() < 1e-9);
    }

    #[test]
    fn test_untabulated_size() {
        assert_eq!(feeder_impedance_ohm_km("20"), None);
        assert_eq!(feeder_impedance_ohm_km("450 kcmil"), None);
    }
}
