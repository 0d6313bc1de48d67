use rand::Rng;

use crate::config::GRID_DIMENSION;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Returns the neighboring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Returns true when the cell lies inside the fixed play grid.
#[must_use]
pub fn in_bounds(cell: Cell) -> bool {
    cell.x >= 0 && cell.y >= 0 && cell.x < GRID_DIMENSION && cell.y < GRID_DIMENSION
}

/// Returns a uniformly random in-bounds cell.
#[must_use]
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> Cell {
    Cell {
        x: rng.gen_range(0..GRID_DIMENSION),
        y: rng.gen_range(0..GRID_DIMENSION),
    }
}

/// Total number of cells in the grid.
#[must_use]
pub fn total_cells() -> usize {
    (GRID_DIMENSION * GRID_DIMENSION) as usize
}
