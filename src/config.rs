use ratatui::style::Color;
use ratatui::symbols::border;
use thiserror::Error;

/// Default board side length in cells.
pub const DEFAULT_TILE_COUNT: u16 = 20;

/// Default lower bound for apples kept on the board.
pub const DEFAULT_MIN_FOOD: usize = 10;

/// Default upper bound for apples kept on the board.
pub const DEFAULT_MAX_FOOD: usize = 20;

/// Base tick interval in milliseconds (level 1 cadence).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// How much faster each level runs, in milliseconds per level.
pub const TICK_DECREMENT_PER_LEVEL_MS: u64 = 10;

/// Apples consumed per level advance.
pub const DEFAULT_APPLES_PER_LEVEL: u32 = 5;

/// Base points granted per apple, multiplied by the current level.
pub const POINTS_PER_APPLE: u32 = 10;

/// Immutable game parameters, fixed at engine construction.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    /// Board side length in cells (the board is always square).
    pub tile_count: u16,
    /// Replenishment tops the food set back up to this count.
    pub min_food: usize,
    /// The food set never grows beyond this count.
    pub max_food: usize,
    /// Tick interval at level 1, in milliseconds.
    pub base_tick_ms: u64,
    /// Apples consumed per level advance.
    pub apples_per_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_count: DEFAULT_TILE_COUNT,
            min_food: DEFAULT_MIN_FOOD,
            max_food: DEFAULT_MAX_FOOD,
            base_tick_ms: DEFAULT_TICK_INTERVAL_MS,
            apples_per_level: DEFAULT_APPLES_PER_LEVEL,
        }
    }
}

/// Rejected game parameters.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("tile count must be at least 2, got {0}")]
    TileCountTooSmall(u16),
    #[error("tick interval must be positive")]
    ZeroTickInterval,
    #[error("apples per level must be positive")]
    ZeroApplesPerLevel,
    #[error("min food {min} exceeds max food {max}")]
    FoodBoundsReversed { min: usize, max: usize },
    #[error("max food {max_food} leaves no room for the snake on {cells} cells")]
    FoodExceedsBoard { max_food: usize, cells: usize },
}

impl GameConfig {
    /// Validates the parameters, returning the config unchanged on success.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.tile_count < 2 {
            return Err(ConfigError::TileCountTooSmall(self.tile_count));
        }
        if self.base_tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.apples_per_level == 0 {
            return Err(ConfigError::ZeroApplesPerLevel);
        }
        if self.min_food > self.max_food {
            return Err(ConfigError::FoodBoundsReversed {
                min: self.min_food,
                max: self.max_food,
            });
        }

        let cells = usize::from(self.tile_count) * usize::from(self.tile_count);
        if self.max_food >= cells {
            return Err(ConfigError::FoodExceedsBoard {
                max_food: self.max_food,
                cells,
            });
        }

        Ok(self)
    }

    /// Returns the tick interval for `level` in milliseconds.
    ///
    /// Each level above 1 shaves [`TICK_DECREMENT_PER_LEVEL_MS`] off the
    /// base interval, floored at [`MIN_TICK_INTERVAL_MS`].
    #[must_use]
    pub fn tick_interval_ms_for_level(self, level: u32) -> u64 {
        let speedup = u64::from(level.saturating_sub(1)) * TICK_DECREMENT_PER_LEVEL_MS;
        self.base_tick_ms
            .saturating_sub(speedup)
            .max(MIN_TICK_INTERVAL_MS)
    }
}

/// A color theme applied to all visual elements.
///
/// Every entity renders as a single colored glyph; the theme picks the
/// colors, the glyph constants below pick the shapes.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_value: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Classic green snake on dark, red apples.
pub const THEME_ORCHARD: Theme = Theme {
    name: "Orchard",
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    hud_value: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

pub const GLYPH_FOOD: &str = "●";
pub const GLYPH_SNAKE_BODY: &str = "█";
pub const GLYPH_SNAKE_TAIL: &str = "▓";
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";

#[cfg(test)]
mod tests {
    use super::{ConfigError, GameConfig, MIN_TICK_INTERVAL_MS};

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validated().is_ok());
    }

    #[test]
    fn degenerate_boards_are_rejected() {
        let config = GameConfig {
            tile_count: 1,
            ..GameConfig::default()
        };
        assert_eq!(config.validated(), Err(ConfigError::TileCountTooSmall(1)));
    }

    #[test]
    fn reversed_food_bounds_are_rejected() {
        let config = GameConfig {
            min_food: 30,
            max_food: 20,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validated(),
            Err(ConfigError::FoodBoundsReversed { min: 30, max: 20 })
        );
    }

    #[test]
    fn food_bound_must_leave_room_for_the_snake() {
        let config = GameConfig {
            tile_count: 3,
            min_food: 1,
            max_food: 9,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validated(),
            Err(ConfigError::FoodExceedsBoard {
                max_food: 9,
                cells: 9
            })
        );
    }

    #[test]
    fn tick_interval_shrinks_with_level_down_to_floor() {
        let config = GameConfig::default();

        assert_eq!(config.tick_interval_ms_for_level(1), 200);
        assert_eq!(config.tick_interval_ms_for_level(2), 190);
        assert_eq!(config.tick_interval_ms_for_level(15), 60);
        assert_eq!(config.tick_interval_ms_for_level(100), MIN_TICK_INTERVAL_MS);
    }
}
