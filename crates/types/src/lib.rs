//! Shared types and constants for the grid engine.
//!
//! Everything here is plain data: the board dimensions, the block kinds that
//! can occupy a cell, movement directions, engine events and the player
//! actions the driver forwards to the engine.
//!
//! # Board Dimensions
//!
//! The board is fixed, it is never configured at runtime:
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Timing
//!
//! The engine itself has no clock. The driver ticks it every
//! `BASE_TICK_MS / (level + 1)` milliseconds, where `level = lines / 10`.
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 500ms |
//! | 2 | 333ms |
//! | 9 | 100ms |
//!
//! # Examples
//!
//! ```
//! use gridfall_types::{BlockType, MoveDirection, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(GRID_WIDTH, 12);
//! assert_eq!(GRID_HEIGHT, 20);
//!
//! assert_eq!(BlockType::from_code(3), Some(BlockType::Line));
//! assert!(BlockType::Empty.is_empty());
//!
//! assert_eq!(MoveDirection::Down.offset(), (0, 1));
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (12 columns)
pub const GRID_WIDTH: u8 = 12;

/// Board height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Total number of cells on the board
pub const GRID_CELLS: usize = GRID_WIDTH as usize * GRID_HEIGHT as usize;

/// Number of discrete orientations per piece
pub const ROTATION_COUNT: u8 = 4;

/// Number of cells in every non-empty piece
pub const PIECE_CELLS: usize = 4;

/// Tick interval at level 0 (one row per second)
pub const BASE_TICK_MS: u32 = 1000;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points awarded for every spawned piece
pub const SPAWN_POINTS: u32 = 1;

/// Points awarded for every cleared row
pub const LINE_POINTS: u32 = 10;

/// Extra points for clearing several rows in one tick.
///
/// Each `(min_rows, bonus)` entry applies on its own, so a four-row clear
/// collects all three bonuses.
pub const MULTI_LINE_BONUSES: [(u32, u32); 3] = [(2, 5), (3, 10), (4, 25)];

/// Held left/right starts repeating after this delay.
pub const MOVE_REPEAT_DELAY_MS: u32 = 200;

/// Held left/right repeat interval.
pub const MOVE_REPEAT_MS: u32 = 75;

/// Held down starts repeating after this delay.
pub const DROP_REPEAT_DELAY_MS: u32 = 150;

/// Held down repeat interval.
pub const DROP_REPEAT_MS: u32 = 50;

/// Side length of the next-piece preview grid.
pub const PREVIEW_GRID_SIZE: u8 = 5;

/// Block kinds, used both as a cell value and as a piece identity.
///
/// - **Empty**: no block
/// - **Block**: 2x2 square
/// - **Triangle**: T-shaped
/// - **Line**: straight bar of four
/// - **RightT** / **LeftT**: the two L-shaped pieces
/// - **RightShape** / **LeftShape**: the two skew pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    #[default]
    Empty,
    Block,
    Triangle,
    Line,
    RightT,
    LeftT,
    RightShape,
    LeftShape,
}

impl BlockType {
    /// Every block type, `Empty` first.
    pub const ALL: [BlockType; 8] = [
        BlockType::Empty,
        BlockType::Block,
        BlockType::Triangle,
        BlockType::Line,
        BlockType::RightT,
        BlockType::LeftT,
        BlockType::RightShape,
        BlockType::LeftShape,
    ];

    /// The seven kinds a spawned piece can have.
    pub const PIECES: [BlockType; 7] = [
        BlockType::Block,
        BlockType::Triangle,
        BlockType::Line,
        BlockType::RightT,
        BlockType::LeftT,
        BlockType::RightShape,
        BlockType::LeftShape,
    ];

    pub fn is_empty(&self) -> bool {
        matches!(self, BlockType::Empty)
    }

    /// Compact cell code (0 = empty, 1..=7 = pieces), used by snapshots.
    pub fn code(&self) -> u8 {
        match self {
            BlockType::Empty => 0,
            BlockType::Block => 1,
            BlockType::Triangle => 2,
            BlockType::Line => 3,
            BlockType::RightT => 4,
            BlockType::LeftT => 5,
            BlockType::RightShape => 6,
            BlockType::LeftShape => 7,
        }
    }

    /// Inverse of [`BlockType::code`]
    ///
    /// ```
    /// use gridfall_types::BlockType;
    ///
    /// assert_eq!(BlockType::from_code(3), Some(BlockType::Line));
    /// assert_eq!(BlockType::from_code(0), Some(BlockType::Empty));
    /// assert_eq!(BlockType::from_code(8), None);
    /// ```
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(BlockType::Empty),
            1 => Some(BlockType::Block),
            2 => Some(BlockType::Triangle),
            3 => Some(BlockType::Line),
            4 => Some(BlockType::RightT),
            5 => Some(BlockType::LeftT),
            6 => Some(BlockType::RightShape),
            7 => Some(BlockType::LeftShape),
            _ => None,
        }
    }
}

/// Directions a floating piece can be moved in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    /// Unit offset `(dx, dy)` of one step, y grows downwards.
    pub fn offset(&self) -> (i8, i8) {
        match self {
            MoveDirection::Left => (-1, 0),
            MoveDirection::Right => (1, 0),
            MoveDirection::Down => (0, 1),
        }
    }
}

/// Discrete notifications emitted by the engine.
///
/// Delivery is fire-and-forget; the engine never depends on what a sink does
/// with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameEvent {
    /// The floating piece moved one cell
    Moved,
    /// The floating piece rotated
    Rotated,
    /// The floating piece was frozen into the board
    Locked,
    /// A full row was removed
    LineCleared,
    /// A new piece entered the board
    Spawned,
    /// A spawn collided with placed blocks
    GameOver,
    /// The board was reset
    Restarted,
}

impl GameEvent {
    pub const ALL: [GameEvent; 7] = [
        GameEvent::Moved,
        GameEvent::Rotated,
        GameEvent::Locked,
        GameEvent::LineCleared,
        GameEvent::Spawned,
        GameEvent::GameOver,
        GameEvent::Restarted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Moved => "moved",
            GameEvent::Rotated => "rotated",
            GameEvent::Locked => "locked",
            GameEvent::LineCleared => "lineCleared",
            GameEvent::Spawned => "spawned",
            GameEvent::GameOver => "gameOver",
            GameEvent::Restarted => "restarted",
        }
    }

    /// Dense index into `ALL`, handy for counters.
    pub fn index(&self) -> usize {
        match self {
            GameEvent::Moved => 0,
            GameEvent::Rotated => 1,
            GameEvent::Locked => 2,
            GameEvent::LineCleared => 3,
            GameEvent::Spawned => 4,
            GameEvent::GameOver => 5,
            GameEvent::Restarted => 6,
        }
    }
}

/// Player actions the driver applies to a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (forces a tick when blocked)
    MoveDown,
    /// Rotate piece to the next orientation
    Rotate,
    /// Start over (only honoured once the game is over)
    Restart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_codes_roundtrip_for_every_variant() {
        for kind in BlockType::ALL {
            assert_eq!(BlockType::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn pieces_exclude_empty() {
        assert_eq!(BlockType::PIECES.len(), 7);
        assert!(BlockType::PIECES.iter().all(|k| !k.is_empty()));
    }

    #[test]
    fn event_index_matches_all_order() {
        for (i, ev) in GameEvent::ALL.iter().enumerate() {
            assert_eq!(ev.index(), i);
        }
    }

    #[test]
    fn multi_line_bonus_table_matches_scoring_rules() {
        assert_eq!(MULTI_LINE_BONUSES, [(2, 5), (3, 10), (4, 25)]);
        assert_eq!(LINE_POINTS, 10);
        assert_eq!(SPAWN_POINTS, 1);
    }
}
