//! # Game of Life
//!
//! A terminal front end for the `lifegame` universe, using `ratatui` for the
//! interface and `crossterm` for terminal manipulation.
//!
//! ## Controls
//!
//! * s: Start a freshly seeded universe
//! * Space: Pause / resume
//! * Enter: Step one generation while paused
//! * x: Stop and discard the universe
//! * q: Quit
//!
//! With `--headless` the universe is run for a fixed number of generations
//! without a terminal interface.

use std::{
    fs::File,
    io,
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use sysinfo::{System, SystemExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lifegame::{
    ui::{self, MemoryUsage},
    Config, Grid, Palette, RunState, TickSource, Universe,
};

/// Longest the event loop sleeps while no generation is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "lifegame", version, about = "Conway's Game of Life in the terminal")]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of rows (10-100)
    #[arg(long)]
    rows: Option<usize>,

    /// Number of columns (10-100)
    #[arg(long)]
    columns: Option<usize>,

    /// Chance for each cell to start alive (0-1)
    #[arg(long)]
    chance: Option<f32>,

    /// Milliseconds between generations
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a terminal interface
    #[arg(long)]
    headless: bool,

    /// Generations to run in headless mode
    #[arg(long, default_value_t = 100)]
    generations: u64,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Settings file first, then flag overrides through the same validation.
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => Config::default(),
        };

        let settings = &mut config.settings;
        if let Some(rows) = self.rows {
            settings.set_rows(rows)?;
        }
        if let Some(columns) = self.columns {
            settings.set_columns(columns)?;
        }
        if let Some(chance) = self.chance {
            settings.set_revival_chance(chance)?;
        }
        if let Some(ms) = self.interval_ms {
            settings.set_step_interval(Duration::from_millis(ms))?;
        }

        Ok(config)
    }
}

/// The terminal owns stdout while the UI runs, so TUI logs only go to a file.
fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    Ok(())
}

/// Main application state for the terminal front end.
struct App {
    universe: Universe,
    palette: Palette,
    /// System information for resource monitoring
    sys: System,
    /// Last rejected command, shown under the statistics
    message: Option<String>,
}

impl App {
    fn new(universe: Universe, palette: Palette) -> Self {
        Self {
            universe,
            palette,
            sys: System::new_all(),
            message: None,
        }
    }

    fn memory(&self) -> MemoryUsage {
        MemoryUsage {
            used_kb: self.sys.used_memory() / 1024,
            total_kb: self.sys.total_memory() / 1024,
        }
    }

    fn toggle_running(&mut self) -> lifegame::Result<()> {
        match self.universe.state() {
            RunState::Paused => self.universe.resume(),
            _ => self.universe.pause(),
        }
    }

    /// Returns false when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let result = match code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('s') => self.universe.start(),
            KeyCode::Char('x') => self.universe.stop(),
            KeyCode::Char(' ') => self.toggle_running(),
            KeyCode::Enter => self.universe.step().map(|_| ()),
            _ => return true,
        };

        match result {
            Ok(()) => self.message = None,
            Err(err) => {
                warn!(%err, "command rejected");
                self.message = Some(err.to_string());
            }
        }
        true
    }

    fn timeout(&self) -> Duration {
        self.universe
            .ticks()
            .until_next()
            .map_or(IDLE_POLL, |next| next.min(IDLE_POLL))
    }
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
                .split(f.size());

            ui::draw_grid(f, &app.universe, &app.palette, chunks[0]);
            ui::draw_stats(
                f,
                &app.universe,
                app.memory(),
                app.message.as_deref(),
                chunks[1],
            );
        })?;

        if event::poll(app.timeout())? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key(key.code) {
                    return Ok(());
                }
            }
        }

        if app.universe.poll() {
            app.sys.refresh_memory();
        }
    }
}

fn run_tui(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_headless(universe: &mut Universe, generations: u64) -> Result<()> {
    universe.subscribe(|generation: u64, grid: &Grid| {
        info!(generation, population = grid.population(), "generation");
    });

    universe.start()?;
    for _ in 0..generations {
        universe.step()?;
    }

    let stats = *universe.stats();
    let generation = universe.generation();
    println!(
        "Generation: {}\nPopulation: {}\nCells Born: {}\nCells Died: {}\nBirth Rate: {:.2}/gen\nDeath Rate: {:.2}/gen",
        generation,
        stats.population,
        stats.births,
        stats.deaths,
        stats.birth_rate(generation),
        stats.death_rate(generation),
    );

    universe.stop()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.load_config()?;
    let mut universe = match cli.seed {
        Some(seed) => Universe::from_seed(config.settings, seed),
        None => Universe::from_entropy(config.settings),
    };

    if cli.headless {
        return run_headless(&mut universe, cli.generations);
    }

    let mut app = App::new(universe, config.palette);
    run_tui(&mut app)
}
