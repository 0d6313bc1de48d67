use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::board::{self, Cell};
use crate::config::{GLYPH_SNAKE, GRID_DIMENSION, Theme};
use crate::round::{Phase, Snapshot};
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_countdown_overlay, render_game_over_overlay, render_pause_overlay};

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, info: &HudInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, info);
    let board_area = board_rect(play_area);

    let block = Block::bordered().border_style(Style::new().fg(info.theme.border_fg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, snapshot, info.theme);
    render_snake(frame, inner, snapshot, info.theme);

    match snapshot.phase {
        Phase::Countdown => {
            render_countdown_overlay(frame, board_area, snapshot.countdown, info.theme);
        }
        Phase::Paused => render_pause_overlay(frame, board_area, info.theme),
        Phase::Ended => render_game_over_overlay(
            frame,
            board_area,
            snapshot.score,
            snapshot.end_reason,
            info.top_scores,
            info.theme,
        ),
        Phase::Playing => {}
    }
}

/// Food renders as its remaining-lifespan digit, like the countdown the
/// original drew onto the food circle.
fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, snapshot.food_cell) else {
        return;
    };

    let digit = snapshot.food_remaining_secs.min(9).to_string();
    let buffer = frame.buffer_mut();
    buffer.set_string(
        x,
        y,
        digit,
        Style::new()
            .fg(theme.food_timer)
            .bg(theme.food)
            .add_modifier(Modifier::BOLD),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let head = snapshot.snake.first().copied();

    let buffer = frame.buffer_mut();
    for segment in &snapshot.snake {
        let Some((x, y)) = logical_to_terminal(inner, *segment) else {
            continue;
        };

        let style = if Some(*segment) == head {
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme.snake_body)
        };
        buffer.set_string(x, y, GLYPH_SNAKE, style);
    }
}

/// Fixed-size board rectangle centered inside the available play area.
fn board_rect(play_area: Rect) -> Rect {
    let width = u16::try_from(GRID_DIMENSION).unwrap_or(u16::MAX).saturating_add(2);
    let height = width;

    let x = play_area.x + play_area.width.saturating_sub(width) / 2;
    let y = play_area.y + play_area.height.saturating_sub(height) / 2;

    Rect {
        x,
        y,
        width: width.min(play_area.width),
        height: height.min(play_area.height),
    }
}

fn logical_to_terminal(inner: Rect, cell: Cell) -> Option<(u16, u16)> {
    if !board::in_bounds(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
