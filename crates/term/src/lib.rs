//! Terminal rendering for the grid engine.
//!
//! A small, game-oriented rendering layer: [`GameView`] draws a snapshot
//! into a [`FrameBuffer`], and [`TerminalRenderer`] flushes framebuffers to a
//! crossterm backend, writing only what changed between frames.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use gridfall_core as core;
pub use gridfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{block_color, AnchorY, GameView, HudInfo, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
