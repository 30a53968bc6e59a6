//! Command-line configuration.

use clap::Parser;
use thiserror::Error;

use crate::core::{EventLog, EventSink, NullSink, StdRandom};

/// Widest board cell the renderer supports, in terminal columns.
pub const MAX_CELL_WIDTH: u16 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--max-level must be at least 1")]
    ZeroMaxLevel,
    #[error("--cell-width must be between 1 and {max}, got {got}")]
    CellWidth { got: u16, max: u16 },
}

/// Falling-block puzzle on a 12x20 grid, played in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gridfall",
    version,
    about = "Falling-block puzzle on a fixed 12x20 grid, played in the terminal.",
    long_about = "Falling-block puzzle on a fixed 12x20 grid.\n\n\
        CONTROLS:\n  Left/Right, A/D, H/L  Move    Up, W, K  Rotate\n  \
        Down, S, J, Space     Move down (forces a tick when blocked)\n  \
        R / Space             Restart after game over    Q / Esc / Ctrl-C  Quit"
)]
pub struct Config {
    /// Seed for piece selection. Random when not given.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Stop speeding up past this level.
    #[arg(long, value_name = "LEVEL")]
    pub max_level: Option<u32>,

    /// Terminal columns per board cell.
    #[arg(long, default_value_t = 2, value_name = "COLS")]
    pub cell_width: u16,

    /// Print every engine event to stderr as `[Engine] <event>`.
    #[arg(long)]
    pub log_events: bool,

    /// Run this many ticks without a terminal and print the final state as JSON.
    #[arg(long, value_name = "TICKS")]
    pub headless: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            max_level: None,
            cell_width: 2,
            log_events: false,
            headless: None,
        }
    }
}

impl Config {
    /// Parse `std::env::args` and validate.
    pub fn from_args() -> Result<Self, ConfigError> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_level == Some(0) {
            return Err(ConfigError::ZeroMaxLevel);
        }
        if self.cell_width == 0 || self.cell_width > MAX_CELL_WIDTH {
            return Err(ConfigError::CellWidth {
                got: self.cell_width,
                max: MAX_CELL_WIDTH,
            });
        }
        Ok(())
    }

    pub fn rng(&self) -> StdRandom {
        match self.seed {
            Some(seed) => StdRandom::new(seed),
            None => StdRandom::from_entropy(),
        }
    }

    /// Whether `--log-events` output may go to stderr. In the terminal UI a
    /// stderr that is the terminal itself would write over the frame, so
    /// logging needs a redirected stderr there.
    pub fn logging_enabled(&self, stderr_is_tty: bool) -> bool {
        self.log_events && (self.headless.is_some() || !stderr_is_tty)
    }

    pub fn event_sink(&self, stderr_is_tty: bool) -> Box<dyn EventSink> {
        if self.logging_enabled(stderr_is_tty) {
            Box::new(EventLog::stderr())
        } else {
            Box::new(NullSink)
        }
    }
}
