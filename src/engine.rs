use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::board::Board;
use crate::config::{ConfigError, GameConfig, POINTS_PER_APPLE};
use crate::food::FoodSet;
use crate::input::Direction;
use crate::snake::{Cell, Snake};

/// Coarse game-state-machine phase.
///
/// `Idle → Running ⇄ Paused`, `Running → Over`. `Over` is only left via
/// restart, `Idle` only via start.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Over,
}

/// What ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverCause {
    WallCollision,
    SelfCollision,
}

/// Scalar game state, carried on every frame snapshot.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameStats {
    pub score: u32,
    pub level: u32,
    pub apples_eaten: u32,
    pub speed_tick_ms: u64,
    pub phase: Phase,
}

/// Immutable per-tick view of the whole game, for rendering.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub snake_cells: Vec<Cell>,
    pub food_cells: Vec<Cell>,
    pub stats: GameStats,
}

/// Events emitted by the engine and drained by the adapter.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A tick completed; carries the resulting state.
    Frame(FrameSnapshot),
    AppleEaten { cell: Cell, points: u32 },
    LevelUp { level: u32 },
    GameOver {
        cause: GameOverCause,
        final_score: u32,
        new_high_score: bool,
    },
}

/// The game state machine.
///
/// Owns board, snake, food, and RNG; accepts commands between ticks and
/// advances one atomic step per [`GameEngine::tick`]. The snake and food
/// fields are public the way the teacher state is: tests set up exact
/// geometries through them.
#[derive(Debug)]
pub struct GameEngine {
    pub snake: Snake,
    pub food: FoodSet,
    pub stats: GameStats,
    board: Board,
    config: GameConfig,
    direction: Option<Direction>,
    pending_direction: Option<Direction>,
    high_score: u32,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Creates an idle engine with an entropy-seeded RNG.
    ///
    /// `high_score` is the adapter-supplied read-only copy used to flag
    /// new records; the engine never persists anything itself.
    pub fn new(config: GameConfig, high_score: u32) -> Result<Self, ConfigError> {
        Self::with_rng(config, high_score, StdRng::from_entropy())
    }

    /// Creates an idle engine with a deterministic RNG for tests and
    /// reproducible simulations.
    pub fn new_with_seed(
        config: GameConfig,
        high_score: u32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(config, high_score, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, high_score: u32, mut rng: StdRng) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let board = Board::new(config.tile_count);
        let snake = Snake::new(board.center());
        let mut food = FoodSet::new(config.min_food, config.max_food);
        food.replenish(&mut rng, board, &snake);

        Ok(Self {
            snake,
            food,
            stats: GameStats {
                score: 0,
                level: 1,
                apples_eaten: 0,
                speed_tick_ms: config.tick_interval_ms_for_level(1),
                phase: Phase::Idle,
            },
            board,
            config,
            direction: None,
            pending_direction: None,
            high_score,
            rng,
            events: Vec::new(),
        })
    }

    /// Starts a fresh session. Valid from `Idle` and `Over` only.
    pub fn start(&mut self) {
        if !matches!(self.stats.phase, Phase::Idle | Phase::Over) {
            return;
        }

        self.reset_session();
        self.stats.phase = Phase::Running;
        self.events.push(GameEvent::Frame(self.snapshot()));
    }

    /// Forces the machine back to `Idle`, then starts. Valid from any phase.
    pub fn restart(&mut self) {
        self.stats.phase = Phase::Idle;
        self.start();
    }

    /// Flips between `Running` and `Paused`. No-op in any other phase.
    pub fn toggle_pause(&mut self) {
        self.stats.phase = match self.stats.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            other => other,
        };
    }

    /// Requests a direction change, applied on the next tick.
    ///
    /// Ignored outside `Running`. Ignored when `direction` is the exact
    /// opposite of the direction the snake last moved in and the snake is
    /// longer than one cell, since that would be an instant self
    /// collision. Last write wins; there is no queue.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.stats.phase != Phase::Running {
            return;
        }
        if self.snake.len() > 1
            && self.direction == Some(direction.opposite())
        {
            return;
        }

        self.pending_direction = Some(direction);
    }

    /// Advances the simulation by one atomic step.
    ///
    /// No-op unless `Running`; a snake with no direction yet (pre-start
    /// idle) also stays put.
    pub fn tick(&mut self) {
        if self.stats.phase != Phase::Running {
            return;
        }

        if let Some(next) = self.pending_direction.take() {
            self.direction = Some(next);
        }
        let Some(direction) = self.direction else {
            return;
        };

        let new_head = self.snake.proposed_head(direction);
        if !self.board.contains(new_head) {
            self.end_game(GameOverCause::WallCollision);
            return;
        }
        if self.snake.occupies(new_head) {
            self.end_game(GameOverCause::SelfCollision);
            return;
        }

        let grew = self.food.consume(new_head);
        self.snake.advance(new_head, grew);
        if grew {
            self.apply_consumption(new_head);
        }

        self.events.push(GameEvent::Frame(self.snapshot()));
    }

    /// Scoring, leveling, and replenishment for one eaten apple.
    ///
    /// Runs after the snake has advanced, so replenishment sees the final
    /// geometry of this tick and never drops an apple under the snake.
    fn apply_consumption(&mut self, cell: Cell) {
        let points = POINTS_PER_APPLE * self.stats.level;
        self.stats.score += points;
        self.stats.apples_eaten += 1;
        self.events.push(GameEvent::AppleEaten { cell, points });

        if self.stats.apples_eaten % self.config.apples_per_level == 0 {
            self.stats.level += 1;
            self.stats.speed_tick_ms = self.config.tick_interval_ms_for_level(self.stats.level);
            self.events.push(GameEvent::LevelUp {
                level: self.stats.level,
            });
        }

        self.food.replenish(&mut self.rng, self.board, &self.snake);
    }

    fn end_game(&mut self, cause: GameOverCause) {
        self.stats.phase = Phase::Over;

        let new_high_score = self.stats.score > self.high_score;
        if new_high_score {
            self.high_score = self.stats.score;
        }
        self.events.push(GameEvent::GameOver {
            cause,
            final_score: self.stats.score,
            new_high_score,
        });
    }

    fn reset_session(&mut self) {
        self.snake = Snake::new(self.board.center());
        self.direction = None;
        self.pending_direction = None;
        self.stats = GameStats {
            score: 0,
            level: 1,
            apples_eaten: 0,
            speed_tick_ms: self.config.tick_interval_ms_for_level(1),
            phase: self.stats.phase,
        };
        self.food = FoodSet::new(self.config.min_food, self.config.max_food);
        self.food.replenish(&mut self.rng, self.board, &self.snake);
    }

    /// Returns the current state as an immutable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            snake_cells: self.snake.segments().copied().collect(),
            food_cells: self.food.cells().copied().collect(),
            stats: self.stats,
        }
    }

    /// Hands all pending events to the caller.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the current tick cadence.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.stats.speed_tick_ms)
    }

    /// Returns the best score known to the engine, including the current
    /// session once it ends above the supplied high score.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Returns the board.
    #[must_use]
    pub fn board(&self) -> Board {
        self.board
    }

    /// Returns the validated configuration.
    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Returns the direction the snake last moved in, if any.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }
}
