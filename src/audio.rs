use std::io::{self, Write};

use crate::engine::GameEvent;

/// Discrete audio cues produced by gameplay.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cue {
    Eat,
    LevelUp,
    GameOver,
}

/// Fire-and-forget cue sink; implementations may be silenced and must
/// never let an output failure reach the simulation.
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Maps an engine event to the cue it should trigger, if any.
#[must_use]
pub fn cue_for_event(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::AppleEaten { .. } => Some(Cue::Eat),
        GameEvent::LevelUp { .. } => Some(Cue::LevelUp),
        GameEvent::GameOver { .. } => Some(Cue::GameOver),
        GameEvent::Frame(_) => None,
    }
}

/// Terminal-bell cue sink with a mute toggle.
///
/// Distinct cues degrade to distinct bell bursts; write errors are
/// swallowed.
#[derive(Debug)]
pub struct TerminalBell {
    muted: bool,
}

impl TerminalBell {
    /// Creates a bell sink, optionally starting muted.
    #[must_use]
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }

    /// Flips the mute state, returning the new value.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Returns whether the sink is muted.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl CueSink for TerminalBell {
    fn play(&mut self, cue: Cue) {
        if self.muted {
            return;
        }

        let bells: &[u8] = match cue {
            Cue::Eat => b"\x07",
            Cue::LevelUp => b"\x07\x07",
            Cue::GameOver => b"\x07\x07\x07",
        };

        let mut stdout = io::stdout();
        let _ = stdout.write_all(bells);
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::{Cue, CueSink, TerminalBell, cue_for_event};
    use crate::engine::{GameEvent, GameOverCause};
    use crate::snake::Cell;

    #[test]
    fn gameplay_events_map_to_their_cues() {
        let eaten = GameEvent::AppleEaten {
            cell: Cell { x: 1, y: 1 },
            points: 10,
        };
        let leveled = GameEvent::LevelUp { level: 2 };
        let over = GameEvent::GameOver {
            cause: GameOverCause::WallCollision,
            final_score: 40,
            new_high_score: false,
        };

        assert_eq!(cue_for_event(&eaten), Some(Cue::Eat));
        assert_eq!(cue_for_event(&leveled), Some(Cue::LevelUp));
        assert_eq!(cue_for_event(&over), Some(Cue::GameOver));
    }

    #[test]
    fn mute_toggle_round_trips() {
        let mut bell = TerminalBell::new(false);

        assert!(!bell.is_muted());
        assert!(bell.toggle_mute());
        assert!(!bell.toggle_mute());
    }

    #[test]
    fn muted_sink_plays_without_side_effects() {
        // Smoke check: playing while muted must not touch stdout or panic.
        let mut bell = TerminalBell::new(true);
        bell.play(Cue::Eat);
        bell.play(Cue::GameOver);
    }
}
