//! # Game of Life
//!
//! Conway's Game of Life on a bounded, non-wrapping grid.
//!
//! * [`grid`] stores cell states and answers neighbor queries
//! * [`engine`] advances a grid by one generation
//! * [`universe`] owns the run/pause/stop lifecycle and the generation counter
//! * [`ticker`] and the observers on [`Universe`] are the seams a host plugs a
//!   clock and a renderer into
//! * [`ui`] is the `ratatui` renderer used by the terminal front end

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod stats;
pub mod ticker;
pub mod ui;
pub mod universe;

pub use config::{Config, Palette, Settings, MAX_LENGTH, MIN_LENGTH};
pub use error::{Error, Result};
pub use grid::Grid;
pub use stats::Stats;
pub use ticker::{IntervalTimer, TickSource};
pub use universe::{Command, GenerationObserver, RunState, Universe};
