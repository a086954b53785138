//! # Limatron CLI Application
//!
//! Sizes a distribution from a JSON load inventory, or from a few prompted
//! values when no inventory is given, and prints a summary or the full JSON
//! result.

mod cli;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use limatron_core::calculations::{calculate_with, DesignResult};
use limatron_core::file_io::{load_input, load_settings};
use limatron_core::input::LoadInput;
use limatron_core::settings::DesignSettings;
use limatron_core::tables::nom_ref;
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_count(prompt: &str, default: u32) -> u32 {
    let value = prompt_f64(prompt, f64::from(default));
    if value.is_finite() && value > 0.0 {
        value.floor().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

fn prompt_inventory() -> LoadInput {
    println!("Limatron - Low-Voltage Distribution Sizing");
    println!("==========================================");
    println!();

    let fixtures = prompt_count("Lighting fixtures [20]: ", 20);
    let fixture_watts = prompt_f64("Watts per fixture [100]: ", 100.0);
    let receptacles = prompt_count("General receptacles [10]: ", 10);
    let special = prompt_count("Special receptacles [0]: ", 0);
    let feeder_length = prompt_f64("Feeder length (m) [15]: ", 15.0);
    println!();

    let mut input = LoadInput::default()
        .with_lighting(fixtures, fixture_watts)
        .with_receptacles(receptacles)
        .with_special_receptacles(special);
    input.feeder_length_m = feeder_length;
    input
}

fn opt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v))
}

fn print_summary(result: &DesignResult) {
    let pass = |ok: bool| if ok { "OK" } else { "EXCEEDS" };

    println!("═══════════════════════════════════════");
    println!("  DISTRIBUTION DESIGN  {}", result.folio);
    println!("═══════════════════════════════════════");
    println!();
    println!("System:   {} (recommended {}, mode {})", result.system, result.recommended, result.forced_mode);
    println!(
        "Demand:   {:.0} VA installed → {:.0} VA ({:.2} kW)",
        result.demand.installed_va, result.demand.demand_va, result.demand.demand_kw
    );
    println!();
    println!("Feeder:");
    println!(
        "  I = {:.2} A   {}   {} A breaker   {:.1} m   {} conductors",
        result.feeder.current_a,
        result.feeder.gauge,
        result.feeder.breaker_a,
        result.feeder.length_m,
        result.feeder.conductor_count
    );
    println!("  Voltage drop: {}", opt_pct(result.feeder.vd_pct));
    if let Some(formula) = &result.feeder.formula {
        println!("  {}", formula);
    }
    println!();

    println!("Circuits:");
    for c in &result.circuits {
        println!(
            "  {:>2}. {:<20} {:>7.0} VA {:>6.2} A  {:<6} {:>3} A  {:>5.1} m  {:>7}  {}{}",
            c.seq,
            format!("{} {}", c.label, c.index + 1),
            c.va,
            c.current_a,
            c.gauge.map_or("-", |g| g.display_name()),
            c.breaker_a,
            c.length_m,
            opt_pct(c.vd_pct),
            c.connection.code(),
            if c.valid { "" } else { "  (excluded)" }
        );
    }
    println!();

    if let Some(balance) = &result.phase_balance {
        println!("Phase balance:");
        for (i, total) in balance.totals_va.iter().enumerate() {
            println!("  Phase {}: {:.0} VA", i + 1, total);
        }
        println!("  Imbalance: {:.2}%", balance.imbalance_pct);
        println!();
    }

    println!("Ground: {} ({:.2} mm²)", result.ground.gauge, result.ground.area_mm2);
    println!("Conduit:");
    for (label, conduit) in result.conduits.modules() {
        println!(
            "  {:<20} {:<5} {:>7.2} mm²  fill {}",
            label,
            conduit.label,
            conduit.total_area_mm2,
            opt_pct(conduit.fill_pct)
        );
    }
    println!();

    let vd = &result.voltage_drop;
    println!("Voltage drop check:");
    println!("  Feeder:   {:<8} limit {:.1}%  {}", opt_pct(vd.feeder_vd_pct), vd.feeder_limit_pct, pass(vd.feeder_ok));
    println!("  Branch:   {:<8} limit {:.1}%  {}", opt_pct(vd.worst_branch_vd_pct), vd.branch_limit_pct, pass(vd.branch_ok));
    println!("  Total:    {:<8} limit {:.1}%  {}", format!("{:.2}%", vd.total_vd_pct), vd.total_limit_pct, pass(vd.total_ok));

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &result.warnings {
            println!("  ⚠ {}", warning);
        }
    }

    println!();
    println!("Ref: {}; {}; {}; {}", nom_ref::AMPACITY, nom_ref::BRANCH_RATINGS, nom_ref::GROUND, nom_ref::CONDUIT_FILL);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let settings = match &cli.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => DesignSettings::default(),
    };

    let mut input = match &cli.input {
        Some(path) => {
            info!("Reading load inventory from {}", path.display());
            load_input(path).with_context(|| format!("loading inventory from {}", path.display()))?
        }
        None => prompt_inventory(),
    };
    if let Some(mode) = cli.mode {
        input.forced_mode = mode;
    }
    input.phase_assignments.extend(cli.phases.iter().cloned());
    debug!(?input, "resolved inventory");

    let result = calculate_with(&input, &settings);

    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("serializing result")?;
        println!("{}", json);
    } else {
        print_summary(&result);
    }

    Ok(())
}
