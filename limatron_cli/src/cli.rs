use std::path::PathBuf;

use clap::Parser;
use limatron_core::calculations::CircuitId;
use limatron_core::input::PhaseOverride;
use limatron_core::system::ForcedMode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Size a low-voltage distribution from a load inventory", long_about = None)]
pub struct Cli {
    /// Load inventory (JSON); prompts interactively when omitted
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Supply mode: auto, single, split or three (overrides the inventory)
    #[arg(long)]
    pub mode: Option<ForcedMode>,

    /// Design settings (TOML)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Pin a circuit to a phase, e.g. `lighting_0=2` (repeatable)
    #[arg(long = "phase", value_parser = parse_phase)]
    pub phases: Vec<PhaseOverride>,

    /// Print the JSON result only
    #[arg(long)]
    pub json: bool,

    /// Set the logging level
    #[arg(long, default_value = "warn")]
    pub log_level: tracing::Level,
}

/// Parse `<circuit>=<phase>`.
fn parse_phase(raw: &str) -> Result<PhaseOverride, String> {
    let (circuit, phase) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <circuit>=<phase>, got '{}'", raw))?;
    let circuit: CircuitId = circuit.parse().map_err(|e| format!("{}", e))?;
    let phase: u32 = phase
        .trim()
        .parse()
        .map_err(|_| format!("phase must be a whole number, got '{}'", phase))?;
    Ok(PhaseOverride { circuit, phase })
}

#[cfg(test)]
mod tests {
    use super::*;
    use limatron_core::calculations::CircuitCategory;

    #[test]
    fn test_parse_phase() {
        let o = parse_phase("pumps_1=3").unwrap();
        assert_eq!(o.circuit, CircuitId::new(CircuitCategory::Pumps, 1));
        assert_eq!(o.phase, 3);
        assert!(parse_phase("pumps_1").is_err());
        assert!(parse_phase("pumps_1=x").is_err());
        assert!(parse_phase("heaters_0=1").is_err());
    }

    #[test]
    fn test_cli_args() {
        let cli = Cli::try_parse_from([
            "limatron", "--mode", "three", "--phase", "lighting_0=2", "--phase", "receptacles_1=1", "--json",
        ])
        .unwrap();
        assert_eq!(cli.mode, Some(ForcedMode::Three));
        assert_eq!(cli.phases.len(), 2);
        assert!(cli.json);
        assert_eq!(cli.log_level, tracing::Level::WARN);
    }
}
