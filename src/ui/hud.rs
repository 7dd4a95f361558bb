use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::engine::FrameSnapshot;

/// Supplemental values displayed by the HUD row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub high_score: u32,
    pub apples_per_level: u32,
    pub muted: bool,
}

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &FrameSnapshot,
    info: HudInfo,
    theme: &Theme,
) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let stats = &snapshot.stats;
    let progress = stats.apples_eaten % info.apples_per_level;

    let label = Style::default().fg(theme.hud_muted);
    let value = Style::default().fg(theme.hud_value);

    let mut spans = vec![
        Span::styled(" Score ", label),
        Span::styled(stats.score.to_string(), value),
        Span::styled("  Hi ", label),
        Span::styled(info.high_score.to_string(), value),
        Span::styled("  Level ", label),
        Span::styled(stats.level.to_string(), value),
        Span::styled("  Apples ", label),
        Span::styled(
            format!("{progress}/{}", info.apples_per_level),
            value,
        ),
        Span::styled("  Length ", label),
        Span::styled(snapshot.snake_cells.len().to_string(), value),
        Span::styled("  Tick ", label),
        Span::styled(format!("{}ms", stats.speed_tick_ms), value),
    ];
    if info.muted {
        spans.push(Span::styled("  [muted]", label));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), hud_area);

    play_area
}
