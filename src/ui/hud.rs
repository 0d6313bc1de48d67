use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::round::Snapshot;
use crate::store::ScoreEntry;

/// Supplemental values displayed around the play area.
#[derive(Debug, Clone)]
pub struct HudInfo<'a> {
    pub high_score: u32,
    pub top_scores: &'a [ScoreEntry],
    pub theme: &'a Theme,
    /// Whether a score store is plugged in; hides history hints otherwise.
    pub store_enabled: bool,
}

/// Renders the score line and key help, returning the remaining play area.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot,
    info: &HudInfo<'_>,
) -> Rect {
    let [score_area, play_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let mut spans = vec![
        Span::styled(
            format!(" Score: {}", snapshot.score),
            Style::new().fg(info.theme.hud_score),
        ),
        Span::styled(
            format!("   High: {}", info.high_score),
            Style::new().fg(info.theme.hud_muted),
        ),
    ];
    if let Some(notice) = &snapshot.notice {
        spans.push(Span::styled(
            format!("   ⚠ {notice}"),
            Style::new().fg(info.theme.food),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), score_area);

    let help = if info.store_enabled {
        "arrows/WASD move · P pause · R reset · C clear scores · Q quit"
    } else {
        "arrows/WASD move · P pause · R reset · Q quit"
    };
    frame.render_widget(
        Paragraph::new(Line::from(help))
            .alignment(Alignment::Center)
            .style(Style::new().fg(info.theme.hud_muted)),
        help_area,
    );

    play_area
}
