//! Held-key auto-repeat for terminal environments.
//!
//! A fresh press acts immediately. While a movement key stays held, it
//! repeats after a delay and then at a fixed rate:
//!
//! - left / right: after 200ms, every 75ms
//! - down: after 150ms, every 50ms
//!
//! Terminals that do not emit key release events are supported by releasing
//! held keys after a timeout without input.

use std::time::Instant;

use arrayvec::ArrayVec;

use crate::types::{
    GameAction, DROP_REPEAT_DELAY_MS, DROP_REPEAT_MS, MOVE_REPEAT_DELAY_MS, MOVE_REPEAT_MS,
};

/// Actions produced by one [`InputHandler::update`]
pub type RepeatActions = ArrayVec<GameAction, 32>;

/// Repeat timer for one held key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRepeat {
    delay_ms: u32,
    interval_ms: u32,
    /// Time held so far, `None` when released
    held_ms: Option<u32>,
    next_fire_ms: u32,
}

impl KeyRepeat {
    pub const fn new(delay_ms: u32, interval_ms: u32) -> Self {
        Self {
            delay_ms,
            interval_ms,
            held_ms: None,
            next_fire_ms: delay_ms,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held_ms.is_some()
    }

    /// Start holding. Returns false if the key was already held.
    pub fn press(&mut self) -> bool {
        if self.is_held() {
            return false;
        }
        self.held_ms = Some(0);
        self.next_fire_ms = self.delay_ms;
        true
    }

    pub fn release(&mut self) {
        self.held_ms = None;
        self.next_fire_ms = self.delay_ms;
    }

    /// Advance the hold time; returns how many repeats became due.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let Some(held) = self.held_ms.as_mut() else {
            return 0;
        };
        *held = held.saturating_add(elapsed_ms);

        let mut due = 0;
        while *held >= self.next_fire_ms {
            due += 1;
            self.next_fire_ms = self.next_fire_ms.saturating_add(self.interval_ms.max(1));
        }
        due
    }
}

/// Tracks held movement keys and turns them into repeated actions.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// `MoveLeft` or `MoveRight` while one of them is held
    horizontal: Option<GameAction>,
    horizontal_repeat: KeyRepeat,
    down_repeat: KeyRepeat,
    last_key_time: Instant,
    key_release_timeout_ms: u32,
}

// Without release events a tap would otherwise stay "held" forever.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_timings(
            KeyRepeat::new(MOVE_REPEAT_DELAY_MS, MOVE_REPEAT_MS),
            KeyRepeat::new(DROP_REPEAT_DELAY_MS, DROP_REPEAT_MS),
        )
    }

    pub fn with_timings(horizontal: KeyRepeat, down: KeyRepeat) -> Self {
        Self {
            horizontal: None,
            horizontal_repeat: horizontal,
            down_repeat: down,
            last_key_time: Instant::now(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Feed a mapped key press. Movement that is already held yields `None`
    /// (its repeats come from [`update`](Self::update)); everything else
    /// passes straight through.
    pub fn press(&mut self, action: GameAction) -> Option<GameAction> {
        match action {
            GameAction::MoveLeft | GameAction::MoveRight => {
                self.last_key_time = Instant::now();
                if self.horizontal == Some(action) {
                    return None;
                }
                self.horizontal = Some(action);
                self.horizontal_repeat.release();
                self.horizontal_repeat.press();
                Some(action)
            }
            GameAction::MoveDown => {
                self.last_key_time = Instant::now();
                self.down_repeat.press().then_some(action)
            }
            GameAction::Rotate | GameAction::Restart => Some(action),
        }
    }

    /// A terminal auto-repeat event for a key that is still down. Only
    /// refreshes the release timeout; repeats come from our own timers.
    pub fn repeat(&mut self, action: GameAction) {
        let held = match action {
            GameAction::MoveLeft | GameAction::MoveRight => self.horizontal == Some(action),
            GameAction::MoveDown => self.down_repeat.is_held(),
            GameAction::Rotate | GameAction::Restart => false,
        };
        if held {
            self.last_key_time = Instant::now();
        }
    }

    pub fn release(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft | GameAction::MoveRight => {
                if self.horizontal == Some(action) {
                    self.release_horizontal();
                }
            }
            GameAction::MoveDown => self.down_repeat.release(),
            GameAction::Rotate | GameAction::Restart => {}
        }
    }

    /// Advance repeat timers by `elapsed_ms`.
    pub fn update(&mut self, elapsed_ms: u32) -> RepeatActions {
        let mut actions = RepeatActions::new();

        let since_last_key = self.last_key_time.elapsed().as_millis();
        if since_last_key > u128::from(self.key_release_timeout_ms) {
            self.release_horizontal();
            self.down_repeat.release();
        }

        if let Some(action) = self.horizontal {
            for _ in 0..self.horizontal_repeat.advance(elapsed_ms) {
                let _ = actions.try_push(action);
            }
        }
        for _ in 0..self.down_repeat.advance(elapsed_ms) {
            let _ = actions.try_push(GameAction::MoveDown);
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.down_repeat.release();
        self.last_key_time = Instant::now();
    }

    fn release_horizontal(&mut self) {
        self.horizontal = None;
        self.horizontal_repeat.release();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
