#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Passive compost income emitted on a fixed cadence.

use std::time::Duration;

use garden_defence_core::{Cadence, Command, Event, GamePhase};

/// Configuration parameters required to construct the income system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    interval: Duration,
    amount: u32,
}

impl Config {
    /// Creates a configuration crediting `amount` every `interval`.
    #[must_use]
    pub const fn new(interval: Duration, amount: u32) -> Self {
        Self { interval, amount }
    }
}

/// Pure system that converts elapsed time into compost credits.
#[derive(Debug)]
pub struct Income {
    cadence: Cadence,
    amount: u32,
}

impl Income {
    /// Creates a new income system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            cadence: Cadence::new(config.interval),
            amount: config.amount,
        }
    }

    /// Emits one `CreditCompost` command per elapsed interval.
    pub fn handle(&mut self, events: &[Event], phase: GamePhase, out: &mut Vec<Command>) {
        if phase == GamePhase::Over || events.iter().any(|event| *event == Event::GameOver) {
            self.cadence.reset();
            return;
        }

        if self.amount == 0 {
            return;
        }

        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                for _ in 0..self.cadence.advance(*dt) {
                    out.push(Command::CreditCompost {
                        amount: self.amount,
                    });
                }
            }
        }
    }
}
