//! Error types for the universe and its configuration.

use std::time::Duration;

use thiserror::Error;

use crate::universe::{Command, RunState};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("step interval must be positive, got {0:?}")]
    NonPositiveInterval(Duration),

    #[error("cannot {command} while the universe is {state}")]
    InvalidTransition { command: Command, state: RunState },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// True for the configuration range violations.
    pub fn is_range_error(&self) -> bool {
        matches!(self, Error::OutOfRange { .. } | Error::NonPositiveInterval(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
