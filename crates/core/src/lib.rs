//! Grid engine core - pure, deterministic, and testable
//!
//! This crate holds the whole falling-block simulation: the 12x20 board with
//! its floating-piece mask, the shape table, the next-piece spawner and the
//! engine that moves, rotates, locks and clears. It does no I/O and owns no
//! clock; a driver calls [`Game::tick`] at the cadence given by
//! [`scoring::tick_interval_ms`].
//!
//! # Module Structure
//!
//! - [`grid`]: board cells plus the floating mask
//! - [`shapes`]: base shapes and their four rotations, built once
//! - [`spawner`]: uniform next-piece generator with one piece of look-ahead
//! - [`engine`]: move / rotate / tick / restart on an explicit [`GameState`]
//! - [`scoring`]: line-clear points, level and tick interval
//! - [`events`]: event sinks (recording, counting, logging)
//! - [`rng`]: random sources
//! - [`game`]: engine + state + sink in one value
//!
//! # Rules
//!
//! - Every spawned piece scores 1, every cleared row 10, with cumulative
//!   bonuses of 5 / 10 / 25 for two / three / four rows in one tick
//! - Rotation pivots on the top-left anchor of the shape matrix, no kicks
//! - A spawn that overlaps placed blocks ends the game
//! - `level = lines / 10`
//!
//! # Example
//!
//! ```
//! use gridfall_core::Game;
//! use gridfall_types::MoveDirection;
//!
//! let mut game = Game::new(12345);
//! game.initialize();
//! assert_eq!(game.score(), 1);
//!
//! game.move_piece(MoveDirection::Left);
//! game.rotate();
//! game.tick();
//!
//! assert!(!game.game_over());
//! assert_eq!(game.state().floating_count(), 4);
//! ```

pub mod engine;
pub mod events;
pub mod game;
pub mod grid;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;
pub mod spawner;
pub mod state;

pub use gridfall_types as types;

pub use engine::{GridEngine, TickOutcome};
pub use events::{EventCounts, EventLog, EventSink, NullSink};
pub use game::Game;
pub use grid::GridState;
pub use rng::{RandomSource, ScriptedRng, SimpleRng, StdRandom};
pub use scoring::{calculate_level, capped_tick_interval_ms, line_clear_score, tick_interval_ms};
pub use shapes::{ShapeLibrary, ShapeMatrix};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use spawner::PieceSpawner;
pub use state::{ActivePiece, GameState, Phase};
