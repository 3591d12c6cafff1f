#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Garden Defence session.

mod config;
mod logging;
mod script;

use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Result};
use clap::Parser;
use garden_defence_core::{Event, GamePhase, GardenConfig};
use garden_defence_simulation::Simulation;
use garden_defence_world::query;
use log::{debug, info, warn};

/// Runs a headless Garden Defence simulation.
#[derive(Debug, Parser)]
#[command(name = "garden-defence", version)]
struct Args {
    /// TOML file overriding garden constants.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for lane selection.
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Simulated seconds to run.
    #[arg(long, default_value_t = 120)]
    seconds: u64,
    /// Fixed tick length in milliseconds.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,
    /// Planting queued before the first tick, as `kind@x,y` in layout pixels.
    #[arg(long = "plant", value_name = "KIND@X,Y", value_parser = script::parse_planting)]
    plantings: Vec<script::Planting>,
    /// Log every event.
    #[arg(short, long)]
    verbose: bool,
}

/// Counts of the notable events seen during a run.
#[derive(Debug, Default)]
struct Tally {
    spawned: usize,
    destroyed: usize,
    planted: usize,
    rejected: usize,
}

impl Tally {
    fn record(&mut self, event: &Event) {
        match event {
            Event::PestSpawned { .. } => self.spawned += 1,
            Event::PestRemoved { .. } => self.destroyed += 1,
            Event::DefenderPlaced { .. } => self.planted += 1,
            Event::PlacementRejected { .. } | Event::RemovalRejected { .. } => {
                self.rejected += 1
            }
            _ => {}
        }
    }
}

/// Entry point for the Garden Defence command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    if args.tick_ms == 0 {
        bail!("--tick-ms must be greater than zero");
    }
    let config = match &args.config {
        Some(path) => config::load(path)?,
        None => GardenConfig::default(),
    };

    let mut simulation = Simulation::new(config, args.seed);
    println!("{}", query::welcome_banner(simulation.world()));

    for planting in &args.plantings {
        if let Err(reason) = simulation.request_placement(&planting.kind, planting.cursor) {
            warn!(
                "ignoring planting {} at ({}, {}): {reason}",
                planting.kind, planting.cursor.x, planting.cursor.y
            );
        }
    }

    let events = simulation.run_for(
        Duration::from_secs(args.seconds),
        Duration::from_millis(args.tick_ms),
    );

    let mut tally = Tally::default();
    for event in &events {
        match event {
            Event::GameOver => info!("a pest reached the house"),
            Event::TimeAdvanced { .. } | Event::PestMoved { .. } => {}
            other => debug!("{other:?}"),
        }
        tally.record(event);
    }

    let world = simulation.world();
    let outcome = match simulation.phase() {
        GamePhase::Running => "garden held",
        GamePhase::Over => "garden overrun",
    };
    println!(
        "{outcome} after {:.1}s: {} pests spawned, {} destroyed, {} still in the garden",
        query::elapsed(world).as_secs_f32(),
        tally.spawned,
        tally.destroyed,
        query::pest_view(world).len(),
    );
    println!(
        "{} defenders planted ({} standing, {} requests rejected), {} compost in the bank",
        tally.planted,
        query::defender_view(world).len(),
        tally.rejected,
        query::balance(world),
    );
    Ok(())
}
