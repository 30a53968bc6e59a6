//! Gridfall (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and adds the pieces
//! that sit between the engine and the terminal: [`session::Session`]
//! (tick cadence, level, high score) and [`config::Config`] (CLI flags).

pub use gridfall_core as core;
pub use gridfall_input as input;
pub use gridfall_term as term;
pub use gridfall_types as types;

pub mod config;
pub mod session;

pub use config::{Config, ConfigError};
pub use session::{FrameReport, Session};
