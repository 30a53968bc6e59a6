//! Read-only copy of a game, for renderers and headless output.

use serde::Serialize;

use crate::state::ActivePiece;
use crate::types::{BlockType, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: BlockType,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Cell codes, `board[y][x]` (see [`BlockType::code`])
    pub board: [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub floating: [[bool; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub preview: BlockType,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<BlockType> {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .and_then(|&code| BlockType::from_code(code))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            floating: [[false; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            preview: BlockType::Empty,
            score: 0,
            lines: 0,
            level: 0,
            game_over: false,
        }
    }
}
