use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;
use crate::round::EndReason;
use crate::store::ScoreEntry;

/// Draws the pre-round countdown as a centered popup. A value of zero
/// shows the "GO!" banner.
pub fn render_countdown_overlay(frame: &mut Frame<'_>, area: Rect, countdown: u8, theme: &Theme) {
    let popup = centered_popup(area, 30, 20);
    frame.render_widget(Clear, popup);

    let text = if countdown > 0 {
        countdown.to_string()
    } else {
        "GO!".to_string()
    };

    frame.render_widget(
        Paragraph::new(Line::from(text))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.overlay_title)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::bordered()),
        popup,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_overlay(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 50, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[P] Resume"),
        Line::from("[R] Reset    [Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.overlay_title))
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the end-of-round screen with the score history.
pub fn render_game_over_overlay(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    end_reason: Option<EndReason>,
    top_scores: &[ScoreEntry],
    theme: &Theme,
) {
    let popup = centered_popup(area, 70, 70);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(popup);

    let title = match end_reason {
        Some(EndReason::BoardFull) => "YOU WIN",
        _ => "GAME OVER",
    };
    frame.render_widget(
        Paragraph::new(Line::from(title))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.overlay_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let mut lines = vec![Line::from(format!("Score: {score}")), Line::from("")];
    if top_scores.is_empty() {
        lines.push(Line::from("No scores yet"));
    } else {
        for (rank, entry) in top_scores.iter().enumerate() {
            lines.push(Line::from(format!("{}. {} points", rank + 1, entry.score)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from("[Space]/[Enter] Play Again   [Q] Quit"));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" best scores ")),
        body_row,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
