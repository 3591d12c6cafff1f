#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure planting system that turns pointer requests into placement commands.

use garden_defence_core::{Command, DefenderKind, GamePhase, Layout, PlacementError};
use glam::Vec2;

/// Input snapshot distilled from adapter-provided pointer data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantingInput<'a> {
    /// Name of the selected defender kind, as shown on its seed card.
    pub kind: &'a str,
    /// Pointer position in layout units.
    pub cursor: Vec2,
}

impl<'a> PlantingInput<'a> {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(kind: &'a str, cursor: Vec2) -> Self {
        Self { kind, cursor }
    }
}

/// System that validates what it can locally and queues the rest for the world.
#[derive(Clone, Copy, Debug, Default)]
pub struct Planting;

impl Planting {
    /// Creates a new planting system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Translates a pointer request into a `PlaceDefender` command.
    ///
    /// Rejections available without world state are returned immediately and
    /// in the world's order: `GameOver`, then `UnknownKind`, then
    /// `OutOfBounds` for pointer positions that cannot be mapped at all.
    /// Funds, bounds and vacancy are checked when the world applies the
    /// command.
    pub fn handle(
        &self,
        phase: GamePhase,
        layout: &Layout,
        input: PlantingInput<'_>,
        out: &mut Vec<Command>,
    ) -> Result<(), PlacementError> {
        if phase == GamePhase::Over {
            return Err(PlacementError::GameOver);
        }
        let kind: DefenderKind = input.kind.parse()?;
        let (row, column) = layout
            .cell_at(input.cursor.x, input.cursor.y)
            .ok_or(PlacementError::OutOfBounds)?;

        out.push(Command::PlaceDefender { kind, row, column });
        Ok(())
    }
}
