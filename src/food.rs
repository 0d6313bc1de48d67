use rand::Rng;
use thiserror::Error;

use crate::board::{self, Cell};
use crate::config::{FOOD_LIFESPAN_MAX_MS, FOOD_LIFESPAN_MIN_MS};
use crate::snake::SnakeState;

/// Raised when no free cell is left to place food on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SpawnError {
    #[error("no free cell left on the board")]
    BoardFull,
}

/// The single food item active on the board.
///
/// Food carries a randomized lifespan; when the accumulated play time
/// reaches it, the food relocates. Expiry and relocation are one event,
/// there is never a period without food on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub cell: Cell,
    elapsed_ms: u64,
    lifespan_ms: u64,
}

impl Food {
    /// Creates a food item at `cell` with a freshly drawn lifespan.
    #[must_use]
    pub fn at<R: Rng + ?Sized>(rng: &mut R, cell: Cell) -> Self {
        Self {
            cell,
            elapsed_ms: 0,
            lifespan_ms: rng.gen_range(FOOD_LIFESPAN_MIN_MS..FOOD_LIFESPAN_MAX_MS),
        }
    }

    /// Spawns food on a uniformly random cell not occupied by the snake.
    ///
    /// Rejection-samples the board, guarded by an up-front fullness check so
    /// a fully occupied board is a reported condition instead of an
    /// infinite loop. The body never self-overlaps, so `len()` equals the
    /// number of occupied cells.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, snake: &SnakeState) -> Result<Self, SpawnError> {
        if snake.len() >= board::total_cells() {
            return Err(SpawnError::BoardFull);
        }

        loop {
            let cell = board::random_cell(rng);
            if !snake.occupies(cell) {
                return Ok(Self::at(rng, cell));
            }
        }
    }

    /// Accumulates `delta_ms` of play time; returns true once the lifespan
    /// is spent and the food should relocate.
    pub fn accumulate(&mut self, delta_ms: u64) -> bool {
        self.elapsed_ms += delta_ms;
        self.elapsed_ms >= self.lifespan_ms
    }

    /// Milliseconds left before this food relocates.
    #[must_use]
    pub fn remaining_ms(&self) -> u64 {
        self.lifespan_ms.saturating_sub(self.elapsed_ms)
    }

    /// Remaining lifespan in whole seconds, rounded up, as shown on the
    /// food itself.
    #[must_use]
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_ms().div_ceil(1000)
    }

    #[cfg(test)]
    pub(crate) fn with_lifespan(cell: Cell, lifespan_ms: u64) -> Self {
        Self {
            cell,
            elapsed_ms: 0,
            lifespan_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::board::Cell;
    use crate::config::{FOOD_LIFESPAN_MAX_MS, FOOD_LIFESPAN_MIN_MS, GRID_DIMENSION};
    use crate::input::Direction;
    use crate::snake::SnakeState;

    use super::{Food, SpawnError};

    #[test]
    fn spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = SnakeState::from_segments(
            vec![
                Cell { x: 0, y: 0 },
                Cell { x: 1, y: 0 },
                Cell { x: 2, y: 0 },
            ],
            Direction::Right,
        );

        for _ in 0..200 {
            let food = Food::spawn(&mut rng, &snake).expect("board is far from full");
            assert!(!snake.occupies(food.cell));
        }
    }

    #[test]
    fn lifespan_is_drawn_from_configured_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = SnakeState::new(Cell { x: 10, y: 10 });

        for _ in 0..200 {
            let food = Food::spawn(&mut rng, &snake).expect("board is far from full");
            assert!(food.remaining_ms() >= FOOD_LIFESPAN_MIN_MS);
            assert!(food.remaining_ms() < FOOD_LIFESPAN_MAX_MS);
        }
    }

    #[test]
    fn full_board_yields_board_full() {
        let mut segments = Vec::new();
        for y in 0..GRID_DIMENSION {
            for x in 0..GRID_DIMENSION {
                segments.push(Cell { x, y });
            }
        }
        let snake = SnakeState::from_segments(segments, Direction::Right);

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Food::spawn(&mut rng, &snake), Err(SpawnError::BoardFull));
    }

    #[test]
    fn accumulate_reports_expiry_at_lifespan() {
        let mut food = Food::with_lifespan(Cell { x: 1, y: 1 }, 450);

        assert!(!food.accumulate(150));
        assert!(!food.accumulate(150));
        assert_eq!(food.remaining_secs(), 1);
        assert!(food.accumulate(150));
        assert_eq!(food.remaining_ms(), 0);
    }
}
