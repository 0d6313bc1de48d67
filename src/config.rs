use ratatui::style::Color;

use crate::board::Cell;

/// Side length of the square play grid, in cells.
pub const GRID_DIMENSION: i32 = 20;

/// Simulation tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 150;

/// Starting value of the pre-round countdown.
pub const COUNTDOWN_START: u8 = 3;

/// Cadence of the countdown in milliseconds, independent of the tick.
pub const COUNTDOWN_STEP_MS: u64 = 1000;

/// How long the "GO!" banner holds after the countdown reaches zero.
pub const COUNTDOWN_GO_HOLD_MS: u64 = 500;

/// Lower bound (inclusive) of a food item's random lifespan in milliseconds.
pub const FOOD_LIFESPAN_MIN_MS: u64 = 1000;

/// Upper bound (exclusive) of a food item's random lifespan in milliseconds.
pub const FOOD_LIFESPAN_MAX_MS: u64 = 5000;

/// Canonical snake start cell for every new round.
pub const START_CELL: Cell = Cell { x: 10, y: 10 };

/// How many history entries the game-over screen lists.
pub const HISTORY_DISPLAY_LIMIT: usize = 5;

/// Glyph for every snake segment; head and body differ by color only.
pub const GLYPH_SNAKE: &str = "█";

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub food_timer: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub overlay_title: Color,
}

/// Green snake on dark, after the original canvas palette.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    food_timer: Color::White,
    border_fg: Color::White,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    overlay_title: Color::Green,
};
