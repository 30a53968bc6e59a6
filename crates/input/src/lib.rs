//! Terminal input for the grid engine driver.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and repeats
//! held movement keys at a fixed delay and rate. Terminals that never report
//! key releases are handled with a release timeout.

pub mod handler;
pub mod map;

pub use gridfall_types as types;

pub use handler::{InputHandler, KeyRepeat};
pub use map::{handle_key_event, is_restart_key, should_quit};
