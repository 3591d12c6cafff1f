#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting pest spawn commands.

use std::time::Duration;

use garden_defence_core::{Cadence, Command, Event, GamePhase};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    #[must_use]
    pub const fn new(spawn_interval: Duration, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            rng_seed,
        }
    }
}

/// Pure system that emits one spawn command per elapsed interval while the
/// game is running.
#[derive(Debug)]
pub struct Spawning {
    cadence: Cadence,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            cadence: Cadence::new(config.spawn_interval),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and the lane count to emit spawn commands.
    ///
    /// Once the game is over the accumulated time is discarded, so nothing is
    /// ever spawned as catch-up.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: GamePhase,
        lanes: u32,
        out: &mut Vec<Command>,
    ) {
        if phase == GamePhase::Over || events.iter().any(|event| *event == Event::GameOver) {
            self.cadence.reset();
            return;
        }

        if lanes == 0 {
            return;
        }

        let mut spawn_attempts = 0;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                spawn_attempts += self.cadence.advance(*dt);
            }
        }

        for _ in 0..spawn_attempts {
            let lane = self.rng.gen_range(0..lanes);
            out.push(Command::SpawnPest { lane });
        }
    }
}
