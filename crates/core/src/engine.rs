//! Grid engine - movement, rotation, gravity, line clears and spawning
//!
//! [`GridEngine`] owns only the shared shape table and the random source.
//! All game state is passed in as a [`GameState`], and every notable change
//! is reported to an [`EventSink`].
//!
//! Moves and rotations are all-or-nothing: the floating piece is lifted off
//! the board, its four target cells are checked, and either all four are
//! committed or the piece is put back exactly where it was.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::events::EventSink;
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::multi_line_bonus;
use crate::shapes::ShapeLibrary;
use crate::state::{ActivePiece, GameState};
use crate::types::{
    BlockType, GameEvent, MoveDirection, GRID_HEIGHT, GRID_WIDTH, LINE_POINTS, PIECE_CELLS,
    ROTATION_COUNT, SPAWN_POINTS,
};

type Targets = ArrayVec<(i8, i8), PIECE_CELLS>;

/// What a single [`GridEngine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The floating piece moved down one row
    pub moved: bool,
    /// The floating piece was frozen into the board
    pub locked: bool,
    /// Rows removed during this tick
    pub lines_cleared: u32,
    /// A new piece was introduced
    pub spawned: bool,
    /// The game ended during this tick
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct GridEngine<R = SimpleRng> {
    shapes: Arc<ShapeLibrary>,
    rng: R,
}

impl<R: RandomSource> GridEngine<R> {
    /// Engine using the process-wide shape table.
    pub fn new(rng: R) -> Self {
        Self::with_shapes(ShapeLibrary::shared(), rng)
    }

    pub fn with_shapes(shapes: Arc<ShapeLibrary>, rng: R) -> Self {
        Self { shapes, rng }
    }

    pub fn shapes(&self) -> &ShapeLibrary {
        &self.shapes
    }

    /// Empty the board, zero the counters and spawn the first piece.
    ///
    /// The spawner's look-ahead is kept.
    pub fn initialize<S: EventSink + ?Sized>(&mut self, state: &mut GameState, events: &mut S) {
        reset_play(state);
        self.spawn(state, events);
    }

    /// Introduce the next piece at the top centre of the board.
    ///
    /// Cells that land on placed blocks are skipped while the rest are still
    /// written. Any such conflict ends the game: the floating mask is dropped
    /// and `GameOver` follows the `Spawned` event. Returns false in that case.
    pub fn spawn<S: EventSink + ?Sized>(&mut self, state: &mut GameState, events: &mut S) -> bool {
        let kind = state.spawner.peek_and_advance(&mut self.rng);
        let rotation = self.rng.uniform_int(ROTATION_COUNT as u32) as u8;
        let shape = self.shapes.shape(kind, rotation);

        let x = (GRID_WIDTH / 2) as i8 - (shape.width() / 2) as i8;
        let y = 0i8;

        // A piece still marked floating is frozen where it is.
        state.grid.clear_floating_mask();

        let mut conflict = false;
        for (lx, ly) in shape.occupied() {
            let (bx, by) = (x + lx, y + ly);
            if !state.grid.is_empty_at(bx, by) {
                conflict = true;
                continue;
            }
            state.grid.set(bx, by, kind);
            state.grid.set_floating(bx, by, true);
        }

        state.score = state.score.saturating_add(SPAWN_POINTS);
        state.down_blocked = false;
        events.emit(GameEvent::Spawned);

        if conflict {
            state.game_over = true;
            state.active = None;
            state.grid.clear_floating_mask();
            events.emit(GameEvent::GameOver);
            return false;
        }

        state.active = Some(ActivePiece {
            kind,
            rotation,
            x,
            y,
        });
        true
    }

    /// Shift the floating piece one cell in `direction`.
    ///
    /// A blocked downward move sets `state.down_blocked`.
    pub fn move_piece<S: EventSink + ?Sized>(
        &mut self,
        state: &mut GameState,
        direction: MoveDirection,
        events: &mut S,
    ) -> bool {
        if state.game_over {
            return false;
        }
        let Some(mut active) = state.active else {
            return false;
        };

        let (dx, dy) = direction.offset();
        state.grid.lift_floating();

        let mut targets = Targets::new();
        let mut blocked = false;
        for (x, y) in state.grid.floating_cells() {
            let target = (x + dx, y + dy);
            if !state.grid.is_empty_at(target.0, target.1) || targets.try_push(target).is_err() {
                blocked = true;
                break;
            }
        }

        if blocked && direction == MoveDirection::Down {
            state.down_blocked = true;
        }
        if !accept(blocked, &targets) {
            state.grid.fill_floating(active.kind);
            return false;
        }

        commit(state, &targets, active.kind);
        active.x += dx;
        active.y += dy;
        state.active = Some(active);
        events.emit(GameEvent::Moved);
        true
    }

    /// Turn the floating piece a quarter clockwise about its anchor.
    pub fn rotate<S: EventSink + ?Sized>(&mut self, state: &mut GameState, events: &mut S) -> bool {
        if state.game_over {
            return false;
        }
        let Some(mut active) = state.active else {
            return false;
        };

        let rotation = (active.rotation + 1) % ROTATION_COUNT;
        let shape = self.shapes.shape(active.kind, rotation);
        state.grid.lift_floating();

        let mut targets = Targets::new();
        let mut blocked = false;
        for (lx, ly) in shape.occupied() {
            let target = (active.x + lx, active.y + ly);
            if !state.grid.is_empty_at(target.0, target.1) || targets.try_push(target).is_err() {
                blocked = true;
                break;
            }
        }

        if !accept(blocked, &targets) {
            state.grid.fill_floating(active.kind);
            return false;
        }

        commit(state, &targets, active.kind);
        active.rotation = rotation;
        state.active = Some(active);
        events.emit(GameEvent::Rotated);
        true
    }

    /// One gravity step.
    ///
    /// Does nothing once the game is over. Otherwise the piece moves down;
    /// if it could not (or a blocked downward move was pending) it locks.
    /// With nothing left floating, full rows are cleared and the next piece
    /// spawns.
    pub fn tick<S: EventSink + ?Sized>(&mut self, state: &mut GameState, events: &mut S) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if state.game_over {
            return outcome;
        }

        let pending_lock = state.down_blocked;
        outcome.moved = self.move_piece(state, MoveDirection::Down, events);

        if !outcome.moved || pending_lock {
            state.grid.clear_floating_mask();
            if state.active.take().is_some() {
                outcome.locked = true;
                events.emit(GameEvent::Locked);
            }
        }
        state.down_blocked = false;

        if !state.grid.has_floating() {
            outcome.lines_cleared = self.clear_lines_and_respawn(state, events);
            outcome.spawned = true;
            outcome.game_over = state.game_over;
        }

        outcome
    }

    /// Wipe the board and counters after a game over.
    ///
    /// The preview piece is kept. No piece is spawned; the next tick does
    /// that.
    pub fn restart<S: EventSink + ?Sized>(&mut self, state: &mut GameState, events: &mut S) {
        reset_play(state);
        events.emit(GameEvent::Restarted);
    }

    fn clear_lines_and_respawn<S: EventSink + ?Sized>(
        &mut self,
        state: &mut GameState,
        events: &mut S,
    ) -> u32 {
        let mut cleared = 0u32;
        for y in 0..GRID_HEIGHT as usize {
            if state.grid.is_row_full(y) {
                state.grid.clear_row(y);
                cleared += 1;
                state.lines = state.lines.saturating_add(1);
                state.score = state.score.saturating_add(LINE_POINTS);
                events.emit(GameEvent::LineCleared);
            }
        }
        state.score = state.score.saturating_add(multi_line_bonus(cleared));

        self.spawn(state, events);
        cleared
    }
}

/// A candidate placement is taken only when it was not blocked and covers
/// exactly four cells. Any other count means the shape table or the floating
/// mask is corrupt.
fn accept(blocked: bool, targets: &Targets) -> bool {
    if blocked {
        return false;
    }
    debug_assert_eq!(
        targets.len(),
        PIECE_CELLS,
        "floating piece must cover exactly {PIECE_CELLS} cells"
    );
    targets.len() == PIECE_CELLS
}

fn commit(state: &mut GameState, targets: &Targets, kind: BlockType) {
    state.grid.clear_floating_mask();
    for &(x, y) in targets {
        state.grid.set(x, y, kind);
        state.grid.set_floating(x, y, true);
    }
}

fn reset_play(state: &mut GameState) {
    state.grid.clear();
    state.active = None;
    state.score = 0;
    state.lines = 0;
    state.game_over = false;
    state.down_blocked = false;
}
