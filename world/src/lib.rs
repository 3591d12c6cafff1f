#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Garden Defence.
//!
//! The world owns the grid, the compost economy, the entity registry and the
//! game phase. Every mutation flows through [`apply`]; rejected requests leave
//! the state untouched and are reported as events.

mod combat;
mod economy;
mod grid;
mod registry;

use std::time::Duration;

use garden_defence_core::{
    Command, DefenderId, DefenderKind, Event, GamePhase, GardenConfig, GridCell, PlacementError,
    RemovalError, WELCOME_BANNER,
};
use log::{debug, info, warn};

use crate::{economy::Economy, grid::Grid, registry::EntityRegistry};

/// Represents the authoritative Garden Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GardenConfig,
    phase: GamePhase,
    grid: Grid,
    economy: Economy,
    registry: EntityRegistry,
    tick_index: u64,
    elapsed: Duration,
}

impl World {
    /// Creates a world using the reference garden configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GardenConfig::default())
    }

    /// Creates a world parameterised by the provided configuration.
    #[must_use]
    pub fn with_config(config: GardenConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid: Grid::new(config.rows, config.columns),
            economy: Economy::new(config.starting_compost),
            registry: EntityRegistry::new(),
            phase: GamePhase::Running,
            tick_index: 0,
            elapsed: Duration::ZERO,
            config,
        }
    }

    /// Flips the phase to `Over`. Returns `true` only for the first call.
    fn end_game(&mut self) -> bool {
        if self.phase == GamePhase::Over {
            return false;
        }
        self.phase = GamePhase::Over;
        true
    }

    /// Drops a defender from the registry and clears its cell.
    fn remove_defender_entry(&mut self, defender: DefenderId) -> Option<GridCell> {
        let removed = self.registry.remove_defender(defender)?;
        self.grid.clear(removed.cell);
        Some(removed.cell)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the phase is [`GamePhase::Over`] the world is frozen: time, combat,
/// spawns and income are ignored, and placement or removal requests are
/// rejected with a `GameOver` reason.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlaceDefender { kind, row, column } => {
            if let Err(reason) = place_defender(world, kind, row, column, out_events) {
                warn!("rejected {kind} at ({row}, {column}): {reason}");
                out_events.push(Event::PlacementRejected {
                    kind,
                    row,
                    column,
                    reason,
                });
            }
        }
        Command::RemoveDefender { defender } => {
            if let Err(reason) = remove_defender(world, defender, out_events) {
                warn!("rejected removal of defender {}: {reason}", defender.get());
                out_events.push(Event::RemovalRejected { defender, reason });
            }
        }
        _ if world.phase == GamePhase::Over => {}
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.elapsed = world.elapsed.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::ResolveCombat { dt } => combat::resolve(world, dt, out_events),
        Command::SpawnPest { lane } => {
            if lane >= world.config.rows {
                warn!("ignoring spawn on missing lane {lane}");
                return;
            }
            let pest = world.registry.add_pest(
                lane,
                world.config.layout.spawn_x,
                world.config.pest_health,
                world.config.pest_speed,
            );
            debug!("pest {} spawned in lane {lane}", pest.get());
            out_events.push(Event::PestSpawned { pest, lane });
        }
        Command::CreditCompost { amount } => {
            let balance = world.economy.credit(amount);
            out_events.push(Event::EconomyChanged { balance });
        }
    }
}

/// Validates and commits a placement request.
///
/// Checks run in a fixed order: phase, kind cost, bounds, affordability and
/// vacancy. Bounds precede affordability so a malformed request is always
/// reported as `OutOfBounds`, whatever the balance. Nothing is mutated until
/// every check has passed, so a rejected request has no side effects. On
/// success the cost is deducted, the defender is registered and its cell
/// occupied, and `EconomyChanged` followed by `DefenderPlaced` are emitted.
pub fn place_defender(
    world: &mut World,
    kind: DefenderKind,
    row: i64,
    column: i64,
    out_events: &mut Vec<Event>,
) -> Result<DefenderId, PlacementError> {
    if world.phase == GamePhase::Over {
        return Err(PlacementError::GameOver);
    }
    let cost = world
        .config
        .costs
        .cost_of(kind)
        .ok_or(PlacementError::UnknownKind)?;
    let cell = world.grid.resolve(row, column)?;
    if !world.economy.can_afford(cost) {
        return Err(PlacementError::InsufficientFunds);
    }
    if !world.grid.is_empty(cell) {
        return Err(PlacementError::CellOccupied);
    }

    let balance = world.economy.spend(cost)?;
    let health = (!kind.is_area_burst()).then_some(world.config.marigold_health);
    let defender = world.registry.add_defender(kind, cell, health);
    world.grid.occupy(cell, defender);

    debug!(
        "{kind} {} planted at ({}, {})",
        defender.get(),
        cell.row(),
        cell.column()
    );
    out_events.push(Event::EconomyChanged { balance });
    out_events.push(Event::DefenderPlaced {
        defender,
        kind,
        cell,
    });
    Ok(defender)
}

/// Removes a defender and clears its cell, releasing any pest it blocked on
/// the next combat pass.
pub fn remove_defender(
    world: &mut World,
    defender: DefenderId,
    out_events: &mut Vec<Event>,
) -> Result<GridCell, RemovalError> {
    if world.phase == GamePhase::Over {
        return Err(RemovalError::GameOver);
    }
    let cell = world
        .remove_defender_entry(defender)
        .ok_or(RemovalError::MissingDefender)?;
    info!("defender {} dug up", defender.get());
    out_events.push(Event::DefenderRemoved { defender, cell });
    Ok(cell)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use garden_defence_core::{
        DefenderId, DefenderSnapshot, DefenderView, GamePhase, GardenConfig, GridCell, PestView,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the configuration the world was built with.
    #[must_use]
    pub fn config(world: &World) -> &GardenConfig {
        &world.config
    }

    /// Reports the current game phase.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Reports the current compost balance.
    #[must_use]
    pub fn balance(world: &World) -> u32 {
        world.economy.balance()
    }

    /// Number of lanes pests may spawn into.
    #[must_use]
    pub fn lane_count(world: &World) -> u32 {
        world.grid.dimensions().0
    }

    /// Grid dimensions as `(rows, columns)`.
    #[must_use]
    pub fn grid_dimensions(world: &World) -> (u32, u32) {
        world.grid.dimensions()
    }

    /// Number of ticks processed while the game was running.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Total simulated time processed while the game was running.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Returns the defender planted in the cell, if any.
    #[must_use]
    pub fn occupant(world: &World, cell: GridCell) -> Option<DefenderId> {
        world.grid.occupant(cell)
    }

    /// Looks up a single defender.
    #[must_use]
    pub fn defender(world: &World, defender: DefenderId) -> Option<DefenderSnapshot> {
        world.registry.defender(defender).map(|entry| entry.snapshot())
    }

    /// Captures a read-only view of the defenders planted in the garden.
    #[must_use]
    pub fn defender_view(world: &World) -> DefenderView {
        DefenderView::from_snapshots(
            world
                .registry
                .defenders()
                .map(|defender| defender.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the pests inside the garden.
    #[must_use]
    pub fn pest_view(world: &World) -> PestView {
        PestView::from_snapshots(world.registry.pests().map(|pest| pest.snapshot()).collect())
    }
}
