#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Garden Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Garden Defence.";

/// Describes whether the simulation still accepts mutations.
///
/// The only permitted transition is `Running -> Over`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pests advance, timers fire and plantings are accepted.
    Running,
    /// A pest breached the defended edge; the simulation is frozen.
    Over,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Runs one combat pass: advance, contact, burst overlap and breach check.
    ResolveCombat {
        /// Duration used to scale pest movement during the pass.
        dt: Duration,
    },
    /// Requests that a pest enter the garden at the right edge of a lane.
    SpawnPest {
        /// Lane (grid row) the pest travels along.
        lane: u32,
    },
    /// Credits passive compost income to the economy.
    CreditCompost {
        /// Amount of compost added to the balance.
        amount: u32,
    },
    /// Requests placement of a defender at the provided grid cell.
    ///
    /// Coordinates are signed so that out-of-range requests stay representable
    /// and can be rejected with [`PlacementError::OutOfBounds`].
    PlaceDefender {
        /// Kind of defender to plant.
        kind: DefenderKind,
        /// Requested row index.
        row: i64,
        /// Requested column index.
        column: i64,
    },
    /// Requests removal of an existing defender.
    RemoveDefender {
        /// Identifier of the defender targeted for removal.
        defender: DefenderId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports the compost balance after it changed.
    EconomyChanged {
        /// Balance after the change was applied.
        balance: u32,
    },
    /// Confirms that a defender was planted.
    DefenderPlaced {
        /// Identifier assigned to the defender by the world.
        defender: DefenderId,
        /// Kind of defender that was planted.
        kind: DefenderKind,
        /// Cell occupied by the defender.
        cell: GridCell,
    },
    /// Reports that a placement request was rejected without side effects.
    PlacementRejected {
        /// Kind of defender requested.
        kind: DefenderKind,
        /// Row provided in the request.
        row: i64,
        /// Column provided in the request.
        column: i64,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a defender left the garden and its cell was cleared.
    DefenderRemoved {
        /// Identifier of the removed defender.
        defender: DefenderId,
        /// Cell the defender used to occupy.
        cell: GridCell,
    },
    /// Reports that a removal request was rejected.
    RemovalRejected {
        /// Identifier targeted by the request.
        defender: DefenderId,
        /// Specific reason the removal failed.
        reason: RemovalError,
    },
    /// Confirms that a pest entered the garden.
    PestSpawned {
        /// Identifier assigned to the pest.
        pest: PestId,
        /// Lane the pest travels along.
        lane: u32,
    },
    /// Reports the new position of an advancing pest.
    PestMoved {
        /// Identifier of the pest that moved.
        pest: PestId,
        /// Horizontal position after the move, in layout units.
        position: f32,
    },
    /// Reports that a pest was blocked by an ordinary defender.
    PestEngaged {
        /// Identifier of the blocked pest.
        pest: PestId,
        /// Defender blocking the pest.
        defender: DefenderId,
    },
    /// Reports that a pest survived a burst with reduced health.
    PestDamaged {
        /// Identifier of the damaged pest.
        pest: PestId,
        /// Health remaining after the damage.
        health: i32,
    },
    /// Confirms that a pest was destroyed.
    PestRemoved {
        /// Identifier of the destroyed pest.
        pest: PestId,
    },
    /// Announces that a pest breached the defended edge.
    GameOver,
}

/// Types of defenders that can be planted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenderKind {
    /// Ordinary defender that blocks pests on contact.
    Marigold,
    /// Single-use area-burst defender that damages the first pest it touches.
    Garlic,
}

impl DefenderKind {
    /// Every plantable kind in declaration order.
    pub const ALL: [DefenderKind; 2] = [DefenderKind::Marigold, DefenderKind::Garlic];

    /// Reports whether the kind detonates on overlap instead of blocking.
    #[must_use]
    pub const fn is_area_burst(self) -> bool {
        matches!(self, Self::Garlic)
    }

    /// Canonical lowercase name used by adapters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Marigold => "marigold",
            Self::Garlic => "garlic",
        }
    }
}

impl fmt::Display for DefenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DefenderKind {
    type Err = PlacementError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "marigold" | "ordinary" => Ok(Self::Marigold),
            "garlic" | "area_burst" | "areaburst" => Ok(Self::Garlic),
            _ => Err(PlacementError::UnknownKind),
        }
    }
}

/// Unique identifier assigned to a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefenderId(u32);

impl DefenderId {
    /// Creates a new defender identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a pest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PestId(u32);

impl PestId {
    /// Creates a new pest identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single in-bounds grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    row: u32,
    column: u32,
}

impl GridCell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row (lane) index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// Reasons a placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies outside the grid.
    #[error("requested cell lies outside the garden grid")]
    OutOfBounds,
    /// The requested cell already holds a defender.
    #[error("requested cell is already planted")]
    CellOccupied,
    /// The compost balance cannot cover the defender's cost.
    #[error("not enough compost")]
    InsufficientFunds,
    /// The requested kind is not recognised or has no configured cost.
    #[error("unknown defender kind")]
    UnknownKind,
    /// A pest already breached the garden.
    #[error("the game is over")]
    GameOver,
}

/// Reasons a removal request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum RemovalError {
    /// No defender with the provided identifier exists.
    #[error("no such defender")]
    MissingDefender,
    /// A pest already breached the garden.
    #[error("the game is over")]
    GameOver,
}

/// Per-kind placement costs. A missing entry makes that kind unplantable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindCosts {
    /// Compost required to plant a marigold.
    pub marigold: Option<u32>,
    /// Compost required to plant a garlic.
    pub garlic: Option<u32>,
}

impl KindCosts {
    /// Looks up the configured cost of a defender kind.
    #[must_use]
    pub const fn cost_of(&self, kind: DefenderKind) -> Option<u32> {
        match kind {
            DefenderKind::Marigold => self.marigold,
            DefenderKind::Garlic => self.garlic,
        }
    }
}

impl Default for KindCosts {
    fn default() -> Self {
        Self {
            marigold: Some(50),
            garlic: Some(50),
        }
    }
}

/// Linear transform between layout units (pixels in the reference layout) and
/// grid cells, plus the horizontal spawn and breach lines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Side length of one square cell.
    pub cell_size: f32,
    /// Horizontal position of column zero.
    pub origin_x: f32,
    /// Vertical position of row zero.
    pub origin_y: f32,
    /// Horizontal position at which pests enter a lane.
    pub spawn_x: f32,
    /// Pests whose position drops below this line breach the garden.
    pub breach_x: f32,
}

impl Layout {
    /// Maps a continuous point onto `(row, column)` using floor division.
    ///
    /// Returns `None` when the point or the transform is not finite. The
    /// result may lie outside the grid; bounds are checked by the world.
    #[must_use]
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(i64, i64)> {
        let row = ((y - self.origin_y) / self.cell_size).floor();
        let column = ((x - self.origin_x) / self.cell_size).floor();
        if !row.is_finite() || !column.is_finite() {
            return None;
        }
        Some((row as i64, column as i64))
    }

    /// Horizontal position of the provided column.
    #[must_use]
    pub fn column_x(&self, column: u32) -> f32 {
        self.origin_x + column as f32 * self.cell_size
    }

    /// Vertical position of the provided row.
    #[must_use]
    pub fn row_y(&self, row: u32) -> f32 {
        self.origin_y + row as f32 * self.cell_size
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cell_size: 90.0,
            origin_x: 200.0,
            origin_y: 120.0,
            spawn_x: 900.0,
            breach_x: 150.0,
        }
    }
}

/// Tunable constants that parameterise a garden.
///
/// Every field has a default, so partial configuration files only override
/// what they mention. Durations are written in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    /// Number of lanes (grid rows).
    pub rows: u32,
    /// Number of plantable columns.
    pub columns: u32,
    /// Cost table for plantable kinds.
    pub costs: KindCosts,
    /// Compost balance at the start of a game.
    pub starting_compost: u32,
    /// Compost credited on every income interval.
    pub income_amount: u32,
    /// Interval between passive income credits.
    #[serde(with = "millis")]
    pub income_interval: Duration,
    /// Interval between pest spawns.
    #[serde(with = "millis")]
    pub spawn_interval: Duration,
    /// Health assigned to freshly spawned pests.
    pub pest_health: i32,
    /// Leftward pest speed in layout units per second.
    pub pest_speed: f32,
    /// Damage dealt by a garlic burst.
    pub burst_damage: i32,
    /// Health assigned to marigolds. Nothing damages them yet.
    pub marigold_health: u32,
    /// Horizontal distance at which a pest touches a defender.
    pub contact_range: f32,
    /// Pixel/cell transform and lane edges.
    pub layout: Layout,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            columns: 9,
            costs: KindCosts::default(),
            starting_compost: 50,
            income_amount: 25,
            income_interval: Duration::from_millis(5_000),
            spawn_interval: Duration::from_millis(5_000),
            pest_health: 50,
            pest_speed: 20.0,
            burst_damage: 50,
            marigold_health: 100,
            contact_range: 30.0,
            layout: Layout::default(),
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Fixed-interval timer driven by elapsed simulation time.
///
/// A zero interval never fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cadence {
    interval: Duration,
    accumulator: Duration,
}

impl Cadence {
    /// Creates a timer that fires once per `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Adds `dt` and returns how many whole intervals elapsed. The remainder
    /// carries over to the next call.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.accumulator = self.accumulator.saturating_add(dt);
        let mut fired = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            fired += 1;
        }
        fired
    }

    /// Discards any partially elapsed interval.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    /// Time accumulated towards the next interval.
    #[must_use]
    pub const fn pending(&self) -> Duration {
        self.accumulator
    }
}

/// Immutable representation of a single defender used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefenderSnapshot {
    /// Identifier allocated to the defender by the world.
    pub id: DefenderId,
    /// Kind of defender that was planted.
    pub kind: DefenderKind,
    /// Cell occupied by the defender.
    pub cell: GridCell,
    /// Remaining health; only ordinary defenders track it.
    pub health: Option<u32>,
}

/// Read-only snapshot describing all defenders in the garden.
#[derive(Clone, Debug, Default)]
pub struct DefenderView {
    snapshots: Vec<DefenderSnapshot>,
}

impl DefenderView {
    /// Creates a new defender view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<DefenderSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &DefenderSnapshot> {
        self.snapshots.iter()
    }

    /// Number of defenders captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no defenders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<DefenderSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single pest used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PestSnapshot {
    /// Identifier allocated to the pest by the world.
    pub id: PestId,
    /// Lane the pest travels along.
    pub lane: u32,
    /// Horizontal position in layout units.
    pub position: f32,
    /// Remaining health.
    pub health: i32,
    /// Leftward speed in layout units per second.
    pub speed: f32,
    /// Defender currently blocking the pest, if any.
    pub engaged_with: Option<DefenderId>,
}

/// Read-only snapshot describing all pests in the garden.
#[derive(Clone, Debug, Default)]
pub struct PestView {
    snapshots: Vec<PestSnapshot>,
}

impl PestView {
    /// Creates a new pest view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PestSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &PestSnapshot> {
        self.snapshots.iter()
    }

    /// Number of pests captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no pests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PestSnapshot> {
        self.snapshots
    }
}
