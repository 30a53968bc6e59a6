//! Game state aggregate
//!
//! Everything that changes during play lives in [`GameState`]: the grid, the
//! active piece, the spawner's look-ahead and the counters. The engine holds
//! no game state of its own; every operation takes the state explicitly.

use crate::grid::GridState;
use crate::scoring::calculate_level;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::spawner::PieceSpawner;
use crate::types::BlockType;

/// The falling piece. `(x, y)` is the board position of the top-left corner
/// of its shape matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: BlockType,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

/// Where the game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No piece on the board yet; the next tick spawns one.
    Spawning,
    Falling,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    pub grid: GridState,
    pub active: Option<ActivePiece>,
    pub spawner: PieceSpawner,
    pub score: u32,
    pub lines: u32,
    pub game_over: bool,
    /// Set when a downward move was blocked; consumed by the next tick.
    pub down_blocked: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `lines / 10`, uncapped
    pub fn level(&self) -> u32 {
        calculate_level(self.lines)
    }

    pub fn preview_piece_type(&self) -> BlockType {
        self.spawner.preview()
    }

    /// Block at `(x, y)`, `Empty` when out of bounds.
    pub fn cell_at(&self, x: i8, y: i8) -> BlockType {
        self.grid.get(x, y).unwrap_or(BlockType::Empty)
    }

    pub fn floating_count(&self) -> usize {
        self.grid.floating_count()
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.grid.has_floating() {
            Phase::Falling
        } else {
            Phase::Spawning
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.board);
        self.grid.write_floating_grid(&mut out.floating);

        out.active = self.active.map(ActiveSnapshot::from);
        out.preview = self.preview_piece_type();
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level();
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
