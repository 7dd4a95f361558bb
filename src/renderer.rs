use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT,
    GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL, Theme,
};
use crate::engine::{FrameSnapshot, GameOverCause, Phase};
use crate::input::Direction;
use crate::snake::Cell;
use crate::ui::hud::{self, HudInfo};
use crate::ui::menu;

/// Adapter-side values the renderer needs beyond the engine snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub tile_count: u16,
    pub apples_per_level: u32,
    pub high_score: u32,
    pub muted: bool,
    pub theme: &'a Theme,
    /// Transient level-up announcement, if one is showing.
    pub level_banner: Option<&'a str>,
    /// Cause and new-record flag captured from the game-over event.
    pub game_over: Option<(GameOverCause, bool)>,
    /// Direction the snake last moved in; picks the head glyph.
    pub head_direction: Option<Direction>,
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, snapshot: &FrameSnapshot, view: &ViewContext<'_>) {
    let area = frame.area();
    let play_area = hud::render_hud(
        frame,
        area,
        snapshot,
        HudInfo {
            high_score: view.high_score,
            apples_per_level: view.apples_per_level,
            muted: view.muted,
        },
        view.theme,
    );

    let board_area = board_rect(play_area, view.tile_count);
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(view.theme.border_fg).bg(view.theme.border_bg))
        .style(Style::new().bg(view.theme.play_bg));

    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, snapshot, view.theme);
    render_snake(frame, inner, snapshot, view);

    match snapshot.stats.phase {
        Phase::Idle => menu::render_start_menu(frame, board_area, view.high_score, view.theme),
        Phase::Paused => menu::render_pause_menu(frame, board_area, view.theme),
        Phase::Over => menu::render_game_over_menu(
            frame,
            board_area,
            snapshot.stats.score,
            view.high_score,
            view.game_over,
            view.theme,
        ),
        Phase::Running => {
            if let Some(text) = view.level_banner {
                menu::render_level_banner(frame, board_area, text, view.theme);
            }
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &FrameSnapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for apple in &snapshot.food_cells {
        let Some((x, y)) = cell_to_terminal(inner, *apple) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
    }
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    snapshot: &FrameSnapshot,
    view: &ViewContext<'_>,
) {
    let theme = view.theme;
    let head = snapshot.snake_cells.first().copied();
    let tail = snapshot.snake_cells.last().copied();

    let buffer = frame.buffer_mut();
    for segment in &snapshot.snake_cells {
        let Some((x, y)) = cell_to_terminal(inner, *segment) else {
            continue;
        };

        if Some(*segment) == head {
            buffer.set_string(
                x,
                y,
                head_glyph(view.head_direction),
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
            continue;
        }

        if Some(*segment) == tail {
            buffer.set_string(x, y, GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail));
            continue;
        }

        buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body));
    }
}

fn head_glyph(direction: Option<Direction>) -> &'static str {
    match direction {
        Some(Direction::Up) => GLYPH_SNAKE_HEAD_UP,
        Some(Direction::Down) => GLYPH_SNAKE_HEAD_DOWN,
        Some(Direction::Left) => GLYPH_SNAKE_HEAD_LEFT,
        Some(Direction::Right) => GLYPH_SNAKE_HEAD_RIGHT,
        // Pre-start idle: no heading yet.
        None => GLYPH_SNAKE_BODY,
    }
}

/// Centers the bordered board inside the play area, clamped to fit.
fn board_rect(area: Rect, tile_count: u16) -> Rect {
    let side = tile_count.saturating_add(2);
    let width = side.min(area.width);
    let height = side.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn cell_to_terminal(inner: Rect, cell: Cell) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(cell.x).ok()?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
