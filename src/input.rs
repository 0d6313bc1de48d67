use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit movement vector for this direction.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Commands understood by the round controller.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Direction(Direction),
    TogglePause,
    Reset,
}

/// Raw input events produced by the terminal frontend.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum UiInput {
    Command(Command),
    /// Space/Enter; restarts the round after game over.
    Confirm,
    /// Wipes the persisted score history.
    ClearScores,
    Quit,
}

/// Polls the terminal for at most `timeout` and maps the next key press.
///
/// Returns `Ok(None)` when no relevant key arrived within the timeout.
pub fn poll_ui_input(timeout: Duration) -> io::Result<Option<UiInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
        _ => Ok(None),
    }
}

fn map_key(key: KeyEvent) -> Option<UiInput> {
    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w') => UiInput::Command(Command::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => UiInput::Command(Command::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => UiInput::Command(Command::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => {
            UiInput::Command(Command::Direction(Direction::Right))
        }
        KeyCode::Char('p') => UiInput::Command(Command::TogglePause),
        KeyCode::Char('r') => UiInput::Command(Command::Reset),
        KeyCode::Char(' ') | KeyCode::Enter => UiInput::Confirm,
        KeyCode::Char('c') => UiInput::ClearScores,
        KeyCode::Char('q') | KeyCode::Esc => UiInput::Quit,
        _ => return None,
    };

    Some(input)
}
