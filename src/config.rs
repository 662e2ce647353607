//! Universe configuration: dimensions, seeding chance, step interval and colors.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const MIN_LENGTH: usize = 10;
pub const MAX_LENGTH: usize = 100;

/// Validated simulation parameters. Every setter rejects out-of-range values
/// and leaves the previous value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    rows: usize,
    columns: usize,
    revival_chance: f32,
    step_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 10,
            revival_chance: 0.3,
            step_interval: Duration::from_secs(1),
        }
    }
}

impl Settings {
    /// Creates settings, validating every value.
    ///
    /// # Errors
    ///
    /// Returns a range error for the first value outside its bounds.
    pub fn new(
        rows: usize,
        columns: usize,
        revival_chance: f32,
        step_interval: Duration,
    ) -> Result<Self> {
        let mut settings = Self::default();
        settings.set_rows(rows)?;
        settings.set_columns(columns)?;
        settings.set_revival_chance(revival_chance)?;
        settings.set_step_interval(step_interval)?;
        Ok(settings)
    }

    /// Number of rows a new grid gets.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns a new grid gets.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Chance for each cell to start alive.
    pub fn revival_chance(&self) -> f32 {
        self.revival_chance
    }

    /// Time between generations while running.
    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    /// Sets the row count; must lie in [`MIN_LENGTH`, `MAX_LENGTH`].
    pub fn set_rows(&mut self, rows: usize) -> Result<()> {
        self.rows = check_length("rows", rows)?;
        Ok(())
    }

    /// Sets the column count; must lie in [`MIN_LENGTH`, `MAX_LENGTH`].
    pub fn set_columns(&mut self, columns: usize) -> Result<()> {
        self.columns = check_length("columns", columns)?;
        Ok(())
    }

    /// Probability in [0, 1] that a cell starts alive when a run is seeded.
    pub fn set_revival_chance(&mut self, chance: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&chance) {
            return Err(Error::OutOfRange {
                field: "revival chance",
                value: chance as f64,
                min: 0.0,
                max: 1.0,
            });
        }
        self.revival_chance = chance;
        Ok(())
    }

    /// Sets the time between generations; zero is rejected.
    pub fn set_step_interval(&mut self, interval: Duration) -> Result<()> {
        if interval.is_zero() {
            return Err(Error::NonPositiveInterval(interval));
        }
        self.step_interval = interval;
        Ok(())
    }
}

fn check_length(field: &'static str, value: usize) -> Result<usize> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&value) {
        return Err(Error::OutOfRange {
            field,
            value: value as f64,
            min: MIN_LENGTH as f64,
            max: MAX_LENGTH as f64,
        });
    }
    Ok(value)
}

/// The two display colors a cell can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub alive: Color,
    pub dead: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            alive: Color::White,
            dead: Color::Black,
        }
    }
}

/// Everything a settings file can carry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub settings: Settings,
    pub palette: Palette,
}

/// On-disk shape. Missing keys fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    rows: Option<usize>,
    columns: Option<usize>,
    revival_chance: Option<f32>,
    step_interval_ms: Option<u64>,
    alive_color: Option<String>,
    dead_color: Option<String>,
}

impl Config {
    /// Reads and validates a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parses and validates settings from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(text)?;
        Self::try_from(file)
    }
}

impl TryFrom<ConfigFile> for Config {
    type Error = Error;

    fn try_from(file: ConfigFile) -> Result<Self> {
        let mut config = Config::default();

        if let Some(rows) = file.rows {
            config.settings.set_rows(rows)?;
        }
        if let Some(columns) = file.columns {
            config.settings.set_columns(columns)?;
        }
        if let Some(chance) = file.revival_chance {
            config.settings.set_revival_chance(chance)?;
        }
        if let Some(ms) = file.step_interval_ms {
            config
                .settings
                .set_step_interval(Duration::from_millis(ms))?;
        }
        if let Some(color) = file.alive_color {
            config.palette.alive = parse_color(&color)?;
        }
        if let Some(color) = file.dead_color {
            config.palette.dead = parse_color(&color)?;
        }

        Ok(config)
    }
}

fn parse_color(text: &str) -> Result<Color> {
    Color::from_str(text).map_err(|_| Error::Config(format!("unknown color '{text}'")))
}
