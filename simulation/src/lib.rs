#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game state controller that drives the world and its systems tick by tick.
//!
//! Adapters queue requests at any time; they are applied at the start of the
//! next tick, before time advances. Each tick then runs, in order: the clock,
//! the spawning and income systems, and one combat pass. Nothing runs
//! concurrently with a combat pass.

use std::{collections::VecDeque, time::Duration};

use garden_defence_core::{Command, Event, GamePhase, GardenConfig, PlacementError};
use garden_defence_system_income::{self as income, Income};
use garden_defence_system_planting::{Planting, PlantingInput};
use garden_defence_system_spawning::{self as spawning, Spawning};
use garden_defence_world::{self as world, query, World};
use glam::Vec2;
use log::{debug, info};

/// Owns one garden and the systems that animate it.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    spawning: Spawning,
    income: Income,
    planting: Planting,
    pending: VecDeque<Command>,
}

impl Simulation {
    /// Creates a simulation for `config`, seeding lane selection with `seed`.
    #[must_use]
    pub fn new(config: GardenConfig, seed: u64) -> Self {
        let spawning = Spawning::new(spawning::Config::new(config.spawn_interval, seed));
        let income = Income::new(income::Config::new(
            config.income_interval,
            config.income_amount,
        ));
        Self {
            world: World::with_config(config),
            spawning,
            income,
            planting: Planting::new(),
            pending: VecDeque::new(),
        }
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current game phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        query::phase(&self.world)
    }

    /// Number of commands waiting for the next tick.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Queues a command for the start of the next tick.
    pub fn submit(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    /// Queues a placement from a pointer position.
    ///
    /// Errors returned here had no effect. Requests that pass are settled at
    /// the next tick and reported as `DefenderPlaced` or `PlacementRejected`.
    pub fn request_placement(&mut self, kind: &str, cursor: Vec2) -> Result<(), PlacementError> {
        let phase = self.phase();
        let layout = query::config(&self.world).layout;
        let mut commands = Vec::new();
        self.planting.handle(
            phase,
            &layout,
            PlantingInput::new(kind, cursor),
            &mut commands,
        )?;
        self.pending.extend(commands);
        Ok(())
    }

    /// Advances the garden by `dt`, returning every event emitted on the way.
    ///
    /// Once the game is over only queued requests are processed, and each is
    /// rejected with a `GameOver` reason.
    pub fn tick(&mut self, dt: Duration) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(command) = self.pending.pop_front() {
            world::apply(&mut self.world, command, &mut events);
        }

        if self.phase() == GamePhase::Over {
            return events;
        }

        let mut clock_events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt }, &mut clock_events);

        let phase = self.phase();
        let lanes = query::lane_count(&self.world);
        let mut commands = Vec::new();
        self.spawning
            .handle(&clock_events, phase, lanes, &mut commands);
        self.income.handle(&clock_events, phase, &mut commands);
        events.append(&mut clock_events);
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        world::apply(&mut self.world, Command::ResolveCombat { dt }, &mut events);

        debug!(
            "tick {} produced {} events",
            query::tick_index(&self.world),
            events.len()
        );
        if events.contains(&Event::GameOver) {
            info!(
                "garden overrun after {:.1}s",
                query::elapsed(&self.world).as_secs_f32()
            );
        }
        events
    }

    /// Ticks with a fixed step until `duration` has elapsed or the game ends.
    ///
    /// A zero `step` processes nothing.
    pub fn run_for(&mut self, duration: Duration, step: Duration) -> Vec<Event> {
        let mut events = Vec::new();
        if step.is_zero() {
            return events;
        }

        let mut remaining = duration;
        while !remaining.is_zero() && self.phase() == GamePhase::Running {
            let dt = step.min(remaining);
            remaining -= dt;
            events.extend(self.tick(dt));
        }
        events
    }
}
