//! Play session - the clock and bookkeeping around one [`Game`]
//!
//! The engine has no notion of time. A session accumulates elapsed game time
//! and ticks the engine whenever `elapsed / interval` crosses a boundary,
//! plus once right away whenever a downward move was blocked. It also keeps
//! the level reached (announced on change), an in-memory high score, and
//! honours restart requests only once the game is over.

use crate::core::{
    calculate_level, capped_tick_interval_ms, EventSink, Game, GameSnapshot, NullSink,
    RandomSource, SimpleRng, TickOutcome,
};
use crate::term::HudInfo;
use crate::types::{GameAction, MoveDirection};

/// What one [`Session::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Outcome of the engine tick, if one ran
    pub tick: Option<TickOutcome>,
    /// Level after a level-up in this frame
    pub level_up: Option<u32>,
}

#[derive(Debug)]
pub struct Session<R = SimpleRng, S = NullSink> {
    game: Game<R, S>,
    elapsed_ms: u64,
    level: u32,
    highscore: u32,
    max_level: Option<u32>,
}

impl Session {
    /// Deterministic session with no event output.
    pub fn new(seed: u32) -> Self {
        Self::with_game(Game::new(seed), None)
    }
}

impl<R: RandomSource, S: EventSink> Session<R, S> {
    /// Take over `game` and initialise it. `max_level` caps the tick speed.
    pub fn with_game(mut game: Game<R, S>, max_level: Option<u32>) -> Self {
        game.initialize();
        let highscore = game.score();
        Self {
            game,
            elapsed_ms: 0,
            level: 0,
            highscore,
            max_level,
        }
    }

    /// Milliseconds between gravity ticks at the current level.
    pub fn tick_interval_ms(&self) -> u32 {
        capped_tick_interval_ms(self.level, self.max_level)
    }

    /// Advance game time by `frame_ms` and tick if due.
    pub fn advance(&mut self, frame_ms: u32) -> FrameReport {
        let interval = u64::from(self.tick_interval_ms());
        let before = self.elapsed_ms;
        self.elapsed_ms = self.elapsed_ms.saturating_add(u64::from(frame_ms));

        if before / interval != self.elapsed_ms / interval || self.game.down_blocked() {
            return self.tick();
        }
        FrameReport {
            tick: None,
            level_up: self.update_level(),
        }
    }

    /// Run one engine tick immediately, outside the clock.
    pub fn tick(&mut self) -> FrameReport {
        let outcome = self.game.tick();
        self.update_highscore();
        FrameReport {
            tick: Some(outcome),
            level_up: self.update_level(),
        }
    }

    /// Apply a player action. Returns whether anything changed.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let changed = match action {
            GameAction::MoveLeft => self.game.move_piece(MoveDirection::Left),
            GameAction::MoveRight => self.game.move_piece(MoveDirection::Right),
            GameAction::MoveDown => self.game.move_piece(MoveDirection::Down),
            GameAction::Rotate => self.game.rotate(),
            GameAction::Restart => self.restart(),
        };
        self.update_highscore();
        changed
    }

    /// Start over, but only after a game over. The high score is kept.
    pub fn restart(&mut self) -> bool {
        if !self.game.game_over() {
            return false;
        }
        self.game.restart();
        self.level = 0;
        true
    }

    /// Level reached in this game (0-based, uncapped).
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn game_over(&self) -> bool {
        self.game.game_over()
    }

    pub fn game(&self) -> &Game<R, S> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game<R, S> {
        &mut self.game
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn hud(&self) -> HudInfo {
        HudInfo {
            highscore: self.highscore,
        }
    }

    fn update_level(&mut self) -> Option<u32> {
        if calculate_level(self.game.lines()) > self.level {
            self.level += 1;
            Some(self.level)
        } else {
            None
        }
    }

    fn update_highscore(&mut self) {
        self.highscore = self.highscore.max(self.game.score());
    }
}
