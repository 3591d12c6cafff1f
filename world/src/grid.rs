//! Dense lane grid recording which defender occupies each cell.

use garden_defence_core::{DefenderId, GridCell, PlacementError};

/// Row-major occupancy table sized to the configured garden.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<Option<DefenderId>>,
}

impl Grid {
    /// Creates an empty grid with the provided dimensions.
    pub(crate) fn new(rows: u32, columns: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            rows,
            columns,
            cells: vec![None; capacity],
        }
    }

    /// Converts a signed request into an in-bounds cell.
    pub(crate) fn resolve(&self, row: i64, column: i64) -> Result<GridCell, PlacementError> {
        let row = u32::try_from(row).map_err(|_| PlacementError::OutOfBounds)?;
        let column = u32::try_from(column).map_err(|_| PlacementError::OutOfBounds)?;
        if row >= self.rows || column >= self.columns {
            return Err(PlacementError::OutOfBounds);
        }
        Ok(GridCell::new(row, column))
    }

    /// Reports whether the cell holds no defender. Out-of-bounds cells are
    /// never empty.
    pub(crate) fn is_empty(&self, cell: GridCell) -> bool {
        self.index(cell)
            .is_some_and(|index| self.cells[index].is_none())
    }

    /// Returns the defender occupying the cell, if any.
    pub(crate) fn occupant(&self, cell: GridCell) -> Option<DefenderId> {
        self.index(cell).and_then(|index| self.cells[index])
    }

    pub(crate) fn occupy(&mut self, cell: GridCell, defender: DefenderId) {
        if let Some(index) = self.index(cell) {
            self.cells[index] = Some(defender);
        }
    }

    /// Empties the cell. Clearing an empty or unknown cell is a no-op.
    pub(crate) fn clear(&mut self, cell: GridCell) {
        if let Some(index) = self.index(cell) {
            self.cells[index] = None;
        }
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    fn index(&self, cell: GridCell) -> Option<usize> {
        if cell.row() < self.rows && cell.column() < self.columns {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
