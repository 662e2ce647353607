//! The universe: a grid plus its run/pause/stop lifecycle.
//!
//! ```text
//! Stopped --start--> Running --pause--> Paused --resume--> Running
//!    ^                  |                  |
//!    +------stop--------+-------stop-------+
//! ```
//!
//! A grid exists only while the universe is Running or Paused. Stopping
//! discards it and resets the generation counter.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::Settings;
use crate::engine;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::stats::Stats;
use crate::ticker::{IntervalTimer, TickSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunState::Stopped => "stopped",
            RunState::Running => "running",
            RunState::Paused => "paused",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Stop,
    Step,
}

impl Command {
    /// Whether this command is accepted in `state`.
    pub fn allowed_in(self, state: RunState) -> bool {
        use RunState::*;
        match self {
            Command::Start => state == Stopped,
            Command::Pause => state == Running,
            Command::Resume => state == Paused,
            Command::Stop | Command::Step => state != Stopped,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Stop => "stop",
            Command::Step => "step",
        })
    }
}

/// Notified once per completed generation. Readers re-read the grid here.
pub trait GenerationObserver {
    fn on_generation(&mut self, generation: u64, grid: &Grid);
}

impl<F> GenerationObserver for F
where
    F: FnMut(u64, &Grid),
{
    fn on_generation(&mut self, generation: u64, grid: &Grid) {
        self(generation, grid)
    }
}

pub struct Universe<T = IntervalTimer, R = ChaCha8Rng> {
    settings: Settings,
    state: RunState,
    grid: Option<Grid>,
    generation: u64,
    stats: Stats,
    ticks: T,
    rng: R,
    observers: Vec<Box<dyn GenerationObserver>>,
}

impl Universe<IntervalTimer, ChaCha8Rng> {
    /// A wall-clock universe with a reproducible seed.
    pub fn from_seed(settings: Settings, seed: u64) -> Self {
        Self::new(settings, IntervalTimer::new(), ChaCha8Rng::seed_from_u64(seed))
    }

    /// A wall-clock universe seeded from OS entropy.
    pub fn from_entropy(settings: Settings) -> Self {
        Self::new(settings, IntervalTimer::new(), ChaCha8Rng::from_entropy())
    }
}

impl<T: TickSource, R: Rng> Universe<T, R> {
    /// A stopped universe that will seed from `rng` and step on `ticks`.
    pub fn new(settings: Settings, ticks: T, rng: R) -> Self {
        Self {
            settings,
            state: RunState::Stopped,
            grid: None,
            generation: 0,
            stats: Stats::default(),
            ticks,
            rng,
            observers: Vec::new(),
        }
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Generations completed since the last start.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The live grid, or `None` while stopped.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Statistics for the current run.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Settings used by the next start.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Dimension and chance changes apply at the next start; interval changes
    /// at the next start or resume.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// The tick source, so hosts can ask when the next step is due.
    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    /// Registers an observer for every completed generation.
    pub fn subscribe(&mut self, observer: impl GenerationObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn ensure(&self, command: Command) -> Result<()> {
        if command.allowed_in(self.state) {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                command,
                state: self.state,
            })
        }
    }

    /// Seeds a fresh grid and begins periodic stepping.
    pub fn start(&mut self) -> Result<()> {
        self.ensure(Command::Start)?;

        let grid = Grid::seeded(
            self.settings.columns(),
            self.settings.rows(),
            self.settings.revival_chance(),
            &mut self.rng,
        );
        self.generation = 0;
        self.stats = Stats::new(grid.population() as u64);
        self.grid = Some(grid);
        self.state = RunState::Running;
        self.ticks.schedule(self.settings.step_interval());

        info!(
            columns = self.settings.columns(),
            rows = self.settings.rows(),
            population = self.stats.population,
            "universe started"
        );
        Ok(())
    }

    /// Suspends periodic stepping, keeping the grid and counter.
    pub fn pause(&mut self) -> Result<()> {
        self.ensure(Command::Pause)?;
        self.ticks.cancel();
        self.state = RunState::Paused;
        info!(generation = self.generation, "universe paused");
        Ok(())
    }

    /// Restarts periodic stepping from the current grid.
    pub fn resume(&mut self) -> Result<()> {
        self.ensure(Command::Resume)?;
        self.ticks.schedule(self.settings.step_interval());
        self.state = RunState::Running;
        info!(generation = self.generation, "universe resumed");
        Ok(())
    }

    /// Halts stepping, discards the grid and resets the counter.
    pub fn stop(&mut self) -> Result<()> {
        self.ensure(Command::Stop)?;
        self.ticks.cancel();
        info!(generation = self.generation, "universe stopped");

        self.grid = None;
        self.generation = 0;
        self.stats = Stats::default();
        self.state = RunState::Stopped;
        Ok(())
    }

    /// Advances exactly one generation and notifies observers. Legal while
    /// running or paused. Returns the new generation number.
    pub fn step(&mut self) -> Result<u64> {
        let grid = match (self.state, self.grid.as_ref()) {
            (RunState::Running | RunState::Paused, Some(grid)) => grid,
            (state, _) => {
                return Err(Error::InvalidTransition {
                    command: Command::Step,
                    state,
                })
            }
        };

        let (next, changes) = engine::advance(grid);
        self.generation += 1;
        self.stats.record(changes);

        debug!(
            generation = self.generation,
            population = self.stats.population,
            births = changes.births,
            deaths = changes.deaths,
            "generation advanced"
        );

        let grid = self.grid.insert(next);
        for observer in &mut self.observers {
            observer.on_generation(self.generation, grid);
        }
        Ok(self.generation)
    }

    /// Runs one generation if the universe is running and a tick is due.
    pub fn poll(&mut self) -> bool {
        if self.state != RunState::Running || !self.ticks.take_due() {
            return false;
        }
        self.step().is_ok()
    }
}
