use std::io;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use orchard_snake::audio::{CueSink, TerminalBell, cue_for_event};
use orchard_snake::config::{
    DEFAULT_TICK_INTERVAL_MS, DEFAULT_TILE_COUNT, GameConfig, THEME_ORCHARD,
};
use orchard_snake::engine::{GameEngine, GameEvent, GameOverCause, Phase};
use orchard_snake::input::{self, GameInput};
use orchard_snake::renderer::{self, ViewContext};
use orchard_snake::score::{HighScoreStore, JsonScoreStore};
use orchard_snake::terminal_runtime::{self, TerminalSession};
use orchard_snake::ticker::Ticker;

/// Input poll timeout; doubles as the redraw cadence.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// How long the level-up banner stays on screen.
const LEVEL_BANNER_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Parser)]
#[command(name = "orchard-snake", version, about = "Multi-apple terminal Snake")]
struct Cli {
    /// Board side length in cells.
    #[arg(long, default_value_t = DEFAULT_TILE_COUNT)]
    tile_count: u16,

    /// Tick interval at level 1, in milliseconds.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Food placement seed, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Start with sound cues muted.
    #[arg(long)]
    mute: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = GameConfig {
        tile_count: cli.tile_count,
        base_tick_ms: cli.tick_ms,
        ..GameConfig::default()
    };

    let store = JsonScoreStore::at_default_location();
    let high_score = match store.load() {
        Ok(score) => score,
        Err(error) => {
            eprintln!("Ignoring unreadable score file: {error}");
            0
        }
    };

    let engine = match cli.seed {
        Some(seed) => GameEngine::new_with_seed(config, high_score, seed),
        None => GameEngine::new(config, high_score),
    };
    let mut engine = match engine {
        Ok(engine) => engine,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            return ExitCode::FAILURE;
        }
    };

    let mut cues = TerminalBell::new(cli.mute);

    terminal_runtime::install_panic_hook();
    let mut session = match TerminalSession::enter() {
        Ok(session) => session,
        Err(error) => {
            eprintln!("Failed to initialize the terminal: {error}");
            return ExitCode::FAILURE;
        }
    };

    let result = run(&mut session, &mut engine, &mut cues, &store, high_score);
    drop(session);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Game loop failed: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    session: &mut TerminalSession,
    engine: &mut GameEngine,
    cues: &mut TerminalBell,
    store: &JsonScoreStore,
    mut high_score: u32,
) -> io::Result<()> {
    let tile_count = engine.board().tile_count();
    let apples_per_level = engine.config().apples_per_level;
    let mut ticker = Ticker::new(engine.tick_interval());
    let mut level_banner: Option<(String, Instant)> = None;
    let mut game_over: Option<(GameOverCause, bool)> = None;

    loop {
        if let Some((_, shown_at)) = &level_banner {
            if shown_at.elapsed() > LEVEL_BANNER_DURATION {
                level_banner = None;
            }
        }

        let snapshot = engine.snapshot();
        let view = ViewContext {
            tile_count,
            apples_per_level,
            high_score,
            muted: cues.is_muted(),
            theme: &THEME_ORCHARD,
            level_banner: level_banner.as_ref().map(|(text, _)| text.as_str()),
            game_over,
            head_direction: engine.direction(),
        };
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &snapshot, &view))?;

        if let Some(game_input) = input::poll_input(INPUT_POLL_INTERVAL)? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Toggle => match engine.stats.phase {
                    Phase::Idle => {
                        engine.start();
                        ticker.set_interval(engine.tick_interval());
                        ticker.start(Instant::now());
                    }
                    Phase::Running | Phase::Paused => toggle_pause(engine, &mut ticker),
                    Phase::Over => restart(engine, &mut ticker, &mut game_over),
                },
                GameInput::Pause => {
                    if matches!(engine.stats.phase, Phase::Running | Phase::Paused) {
                        toggle_pause(engine, &mut ticker);
                    }
                }
                GameInput::Restart => restart(engine, &mut ticker, &mut game_over),
                GameInput::Direction(direction) => engine.set_direction(direction),
                GameInput::MuteToggle => {
                    cues.toggle_mute();
                }
            }
        }

        if ticker.poll(Instant::now()) {
            engine.tick();
        }

        for event in engine.drain_events() {
            if let Some(cue) = cue_for_event(&event) {
                cues.play(cue);
            }

            match event {
                GameEvent::LevelUp { level } => {
                    ticker.set_interval(engine.tick_interval());
                    level_banner = Some((format!("Level {level}!"), Instant::now()));
                }
                GameEvent::GameOver {
                    cause,
                    final_score,
                    new_high_score,
                } => {
                    game_over = Some((cause, new_high_score));
                    ticker.pause();

                    if new_high_score {
                        high_score = final_score;
                        if let Err(error) = store.save(final_score) {
                            eprintln!("Failed to save high score: {error}");
                        }
                    }
                }
                GameEvent::Frame(_) | GameEvent::AppleEaten { .. } => {}
            }
        }
    }

    // A quit mid-session still keeps the record, like the original saved
    // on page unload.
    if engine.stats.score > high_score {
        if let Err(error) = store.save(engine.stats.score) {
            eprintln!("Failed to save high score: {error}");
        }
    }

    Ok(())
}

fn toggle_pause(engine: &mut GameEngine, ticker: &mut Ticker) {
    engine.toggle_pause();
    match engine.stats.phase {
        Phase::Paused => ticker.pause(),
        Phase::Running => ticker.resume(Instant::now()),
        _ => {}
    }
}

fn restart(
    engine: &mut GameEngine,
    ticker: &mut Ticker,
    game_over: &mut Option<(GameOverCause, bool)>,
) {
    engine.restart();
    *game_over = None;
    ticker.set_interval(engine.tick_interval());
    ticker.start(Instant::now());
}
