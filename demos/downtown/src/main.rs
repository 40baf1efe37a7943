//! downtown: a fleet of taxis bidding for fares on a synthetic street grid.
//!
//! Usage: `downtown [config.json]`
//!
//! Without an argument the built-in defaults are used.  The JSON file may
//! set any subset of the fields of [`DemoConfig`], e.g.
//!
//! ```json
//! { "taxis": 6, "sim": { "total_ticks": 2880, "seed": 7 }, "taxi": { "max_wait": 40 } }
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

mod network;

use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use cab_core::Tick;
use cab_sim::{SimBuilder, SimConfig, SimObserver, TaxiSnapshot};
use cab_taxi::TaxiConfig;

use network::build_downtown;

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(default)]
struct DemoConfig {
    width:  i32,
    height: i32,
    taxis:  usize,
    sim:    SimConfig,
    taxi:   TaxiConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width:  12,
            height: 12,
            taxis:  5,
            sim:    SimConfig { fare_probability: 0.25, ..SimConfig::default() },
            taxi:   TaxiConfig::default(),
        }
    }
}

fn load_config() -> Result<DemoConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct FleetReport {
    duty_ticks: u64,
}

impl SimObserver for FleetReport {
    fn on_tick_end(&mut self, _tick: Tick, on_duty: usize) {
        self.duty_ticks += on_duty as u64;
    }

    fn on_snapshot(&mut self, tick: Tick, taxis: &[TaxiSnapshot]) {
        let on_duty = taxis.iter().filter(|t| t.on_duty).count();
        let carrying = taxis.iter().filter(|t| t.passenger.is_some()).count();
        let balance: i64 = taxis.iter().map(|t| t.balance).sum();
        info!(%tick, on_duty, carrying, balance, "fleet");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    println!("=== downtown: rust_cab taxi fleet ===");
    println!(
        "Grid: {}×{}  |  Taxis: {}  |  Ticks: {}  |  Seed: {}",
        config.width, config.height, config.taxis, config.sim.total_ticks, config.sim.seed
    );
    println!();

    let mut sim = SimBuilder::new(config.sim.clone(), build_downtown(config.width, config.height))
        .taxis(config.taxis, config.taxi.clone())
        .build()?;

    let mut report = FleetReport::default();
    let t0 = Instant::now();
    sim.run(&mut report)?;
    let elapsed = t0.elapsed();

    println!();
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.world.clock());
    println!("  fares delivered : {}", sim.world.delivered());
    println!("  fares open      : {}", sim.world.open_fares().count());
    println!("  taxi-ticks      : {}", report.duty_ticks);
    println!();

    println!("{:<10} {:<8} {:<10} {:>8}", "Taxi", "On duty", "Node", "Balance");
    println!("{}", "-".repeat(40));
    for snap in sim.snapshot() {
        let node = snap.location.map_or_else(|| "-".to_string(), |c| c.to_string());
        println!(
            "{:<10} {:<8} {:<10} {:>8}",
            snap.taxi.0,
            if snap.on_duty { "yes" } else { "no" },
            node,
            snap.balance,
        );
    }

    Ok(())
}
