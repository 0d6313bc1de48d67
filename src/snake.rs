use std::collections::VecDeque;

use crate::board::{self, Cell};
use crate::input::Direction;

/// Outcome of advancing the snake by one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AdvanceResult {
    /// The snake moved one cell (or stood still with no heading).
    Moved,
    /// The head landed on the food cell; the snake grew by one segment.
    Ate,
    /// The next head cell was a wall or a body segment; the snake is unchanged.
    Collided,
}

/// Snake body and heading for one round.
///
/// The body is ordered head first and never self-overlapping. The heading is
/// `None` while the snake idles before the round starts, and a concrete
/// direction once play begins.
#[derive(Debug, Clone)]
pub struct SnakeState {
    body: VecDeque<Cell>,
    heading: Option<Direction>,
}

impl SnakeState {
    /// Creates a one-cell snake at `start` with no heading.
    #[must_use]
    pub fn new(start: Cell) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            heading: None,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, heading: Direction) -> Self {
        Self {
            body: VecDeque::from(segments),
            heading: Some(heading),
        }
    }

    /// Requests a heading change, applied from the next advance onward.
    ///
    /// The exact reversal of the current heading is rejected, so the snake
    /// can never fold back into its second segment. Re-requesting the
    /// current heading has no effect either way.
    pub fn set_heading(&mut self, requested: Direction) {
        match self.heading {
            Some(current) if requested == current.opposite() => {}
            _ => self.heading = Some(requested),
        }
    }

    /// Advances the snake one cell along its heading.
    ///
    /// The self-collision check runs against the pre-move body including the
    /// current tail cell: moving into the cell the tail is about to vacate
    /// still counts as a collision. This is the intentionally strict rule
    /// the game has always used, not an optimization.
    pub fn advance(&mut self, food_cell: Cell) -> AdvanceResult {
        let Some(heading) = self.heading else {
            return AdvanceResult::Moved;
        };

        let next_head = self.head().step(heading);

        if !board::in_bounds(next_head) {
            return AdvanceResult::Collided;
        }

        if self.body.iter().skip(1).any(|cell| *cell == next_head) {
            return AdvanceResult::Collided;
        }

        self.body.push_front(next_head);
        if next_head == food_cell {
            AdvanceResult::Ate
        } else {
            let _ = self.body.pop_back();
            AdvanceResult::Moved
        }
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current heading, `None` while idle.
    #[must_use]
    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Iterates over body cells from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Cell;
    use crate::input::Direction;

    use super::{AdvanceResult, SnakeState};

    const NO_FOOD: Cell = Cell { x: -1, y: -1 };

    #[test]
    fn snake_with_no_heading_stays_put() {
        let mut snake = SnakeState::new(Cell { x: 10, y: 10 });

        assert_eq!(snake.advance(NO_FOOD), AdvanceResult::Moved);
        assert_eq!(snake.head(), Cell { x: 10, y: 10 });
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn snake_moves_one_cell_per_advance() {
        let mut snake = SnakeState::new(Cell { x: 5, y: 5 });
        snake.set_heading(Direction::Right);

        assert_eq!(snake.advance(NO_FOOD), AdvanceResult::Moved);
        assert_eq!(snake.head(), Cell { x: 6, y: 5 });
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn eating_grows_by_one_and_keeps_tail() {
        let mut snake = SnakeState::new(Cell { x: 5, y: 5 });
        snake.set_heading(Direction::Right);

        assert_eq!(snake.advance(Cell { x: 6, y: 5 }), AdvanceResult::Ate);
        assert_eq!(snake.head(), Cell { x: 6, y: 5 });
        assert_eq!(snake.len(), 2);
        assert!(snake.occupies(Cell { x: 5, y: 5 }));
    }

    #[test]
    fn reversal_request_is_ignored() {
        let mut snake = SnakeState::new(Cell { x: 5, y: 5 });
        snake.set_heading(Direction::Right);
        snake.set_heading(Direction::Left);

        assert_eq!(snake.heading(), Some(Direction::Right));
        snake.advance(NO_FOOD);
        assert_eq!(snake.head(), Cell { x: 6, y: 5 });
    }

    #[test]
    fn first_heading_from_idle_is_accepted() {
        let mut snake = SnakeState::new(Cell { x: 5, y: 5 });
        snake.set_heading(Direction::Left);

        assert_eq!(snake.heading(), Some(Direction::Left));
    }

    #[test]
    fn wall_collision_leaves_snake_unchanged() {
        let mut snake = SnakeState::new(Cell { x: 19, y: 10 });
        snake.set_heading(Direction::Right);

        assert_eq!(snake.advance(NO_FOOD), AdvanceResult::Collided);
        assert_eq!(snake.head(), Cell { x: 19, y: 10 });
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn head_into_body_collides() {
        let mut snake = SnakeState::from_segments(
            vec![
                Cell { x: 5, y: 5 },
                Cell { x: 4, y: 5 },
                Cell { x: 3, y: 5 },
            ],
            Direction::Left,
        );

        // Heading Left from (5,5) targets (4,5), which is body index 1.
        assert_eq!(snake.advance(NO_FOOD), AdvanceResult::Collided);
    }

    #[test]
    fn moving_into_vacating_tail_cell_still_collides() {
        // Head (2,2), tail (2,3) directly below. Turning down targets the
        // tail cell; the strict rule counts that as a collision even though
        // the tail would vacate this tick.
        let mut snake = SnakeState::from_segments(
            vec![
                Cell { x: 2, y: 2 },
                Cell { x: 1, y: 2 },
                Cell { x: 1, y: 3 },
                Cell { x: 2, y: 3 },
            ],
            Direction::Right,
        );
        snake.set_heading(Direction::Down);

        assert_eq!(snake.advance(NO_FOOD), AdvanceResult::Collided);
        assert_eq!(snake.len(), 4);
    }
}
