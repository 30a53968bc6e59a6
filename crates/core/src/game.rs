//! [`Game`] bundles an engine, its state and an event sink behind the
//! accessor surface the renderer and driver use.

use crate::engine::{GridEngine, TickOutcome};
use crate::events::{EventSink, NullSink};
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::GameSnapshot;
use crate::state::{GameState, Phase};
use crate::types::{BlockType, MoveDirection};

#[derive(Debug, Clone)]
pub struct Game<R = SimpleRng, S = NullSink> {
    engine: GridEngine<R>,
    state: GameState,
    events: S,
}

impl Game {
    /// Deterministic game with no event output. Call
    /// [`initialize`](Game::initialize) before playing.
    pub fn new(seed: u32) -> Self {
        Self::with_parts(SimpleRng::new(seed), NullSink)
    }
}

impl<R: RandomSource, S: EventSink> Game<R, S> {
    pub fn with_parts(rng: R, events: S) -> Self {
        Self {
            engine: GridEngine::new(rng),
            state: GameState::new(),
            events,
        }
    }

    pub fn initialize(&mut self) {
        self.engine.initialize(&mut self.state, &mut self.events);
    }

    pub fn restart(&mut self) {
        self.engine.restart(&mut self.state, &mut self.events);
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.engine.tick(&mut self.state, &mut self.events)
    }

    pub fn spawn(&mut self) -> bool {
        self.engine.spawn(&mut self.state, &mut self.events)
    }

    pub fn move_piece(&mut self, direction: MoveDirection) -> bool {
        self.engine
            .move_piece(&mut self.state, direction, &mut self.events)
    }

    pub fn rotate(&mut self) -> bool {
        self.engine.rotate(&mut self.state, &mut self.events)
    }

    pub fn cell_at(&self, x: i8, y: i8) -> BlockType {
        self.state.cell_at(x, y)
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn lines(&self) -> u32 {
        self.state.lines
    }

    pub fn level(&self) -> u32 {
        self.state.level()
    }

    pub fn game_over(&self) -> bool {
        self.state.game_over
    }

    pub fn preview_piece_type(&self) -> BlockType {
        self.state.preview_piece_type()
    }

    /// True when the last downward move was blocked and the driver should
    /// tick again right away.
    pub fn down_blocked(&self) -> bool {
        self.state.down_blocked
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for setting up positions in tests and tools.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn engine(&self) -> &GridEngine<R> {
        &self.engine
    }

    pub fn events(&self) -> &S {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut S {
        &mut self.events
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }
}
