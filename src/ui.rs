//! Terminal rendering of a universe with `ratatui`.
//!
//! The engine knows nothing about colors. Rendering re-reads the grid after
//! each generation and maps every cell through a [`Palette`].

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use rand::Rng;

use crate::config::Palette;
use crate::grid::Grid;
use crate::ticker::TickSource;
use crate::universe::{RunState, Universe};

/// Terminal columns used per cell, so cells come out roughly square.
pub const CELL_WIDTH: u16 = 2;
const CELL_GLYPH: &str = "██";

impl Palette {
    /// Display color for a cell state.
    pub fn color_for(&self, alive: bool) -> Color {
        if alive {
            self.alive
        } else {
            self.dead
        }
    }
}

/// Centers a bordered `columns x rows` board inside `area`, shrinking it to fit
/// when the terminal is too small.
pub fn frame_area(area: Rect, columns: usize, rows: usize) -> Rect {
    let want_w = (columns as u16).saturating_mul(CELL_WIDTH).saturating_add(2);
    let want_h = (rows as u16).saturating_add(2);
    let width = want_w.min(area.width);
    let height = want_h.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// One styled line per grid row. Row 0 is drawn at the bottom.
pub fn grid_lines(grid: &Grid, palette: &Palette) -> Vec<Line<'static>> {
    (0..grid.rows())
        .rev()
        .map(|y| {
            let spans: Vec<Span<'static>> = grid
                .row(y)
                .iter()
                .map(|&alive| {
                    Span::styled(CELL_GLYPH, Style::default().fg(palette.color_for(alive)))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Key bindings valid in `state`.
pub fn help_text(state: RunState) -> &'static str {
    match state {
        RunState::Stopped => "s: Start | q: Quit",
        RunState::Running => "Space: Pause | x: Stop | q: Quit",
        RunState::Paused => "Space: Resume | Enter: Step | x: Stop | q: Quit",
    }
}

/// Draws the game grid, or a placeholder while stopped.
pub fn draw_grid<T: TickSource, R: Rng>(
    f: &mut Frame,
    universe: &Universe<T, R>,
    palette: &Palette,
    area: Rect,
) {
    let title = format!("Game of Life [{}]", help_text(universe.state()));

    let Some(grid) = universe.grid() else {
        let placeholder = Paragraph::new("No universe. Press s to start.")
            .style(Style::default().fg(Color::White))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(placeholder, area);
        return;
    };

    let board = frame_area(area, grid.columns(), grid.rows());
    let paragraph = Paragraph::new(grid_lines(grid, palette))
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(paragraph, board);
}

/// Process memory in KiB, as `(used, total)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryUsage {
    pub used_kb: u64,
    pub total_kb: u64,
}

pub fn stats_text<T: TickSource, R: Rng>(universe: &Universe<T, R>, memory: MemoryUsage) -> String {
    let generation = universe.generation();
    let stats = universe.stats();
    let settings = universe.settings();

    format!(
        "Statistics:\n\
        Generation: {}\n\
        Current Population: {}\n\
        Cells Born: {}\n\
        Cells Died: {}\n\
        Birth Rate: {:.2}/gen\n\
        Death Rate: {:.2}/gen\n\
        Grid: {}x{}\n\
        Interval: {}ms\n\
        Memory Usage: {}KB/{:.2}MB\n\
        Status: {}\n",
        generation,
        stats.population,
        stats.births,
        stats.deaths,
        stats.birth_rate(generation),
        stats.death_rate(generation),
        settings.columns(),
        settings.rows(),
        settings.step_interval().as_millis(),
        memory.used_kb,
        memory.total_kb as f64 / 1024.0,
        universe.state(),
    )
}

/// Draws the statistics panel, with the last status message underneath.
pub fn draw_stats<T: TickSource, R: Rng>(
    f: &mut Frame,
    universe: &Universe<T, R>,
    memory: MemoryUsage,
    message: Option<&str>,
    area: Rect,
) {
    let mut text = stats_text(universe, memory);
    if let Some(message) = message {
        text.push('\n');
        text.push_str(message);
    }

    let stats_widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Statistics"))
        .wrap(Wrap { trim: true });

    f.render_widget(stats_widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_color_for() {
        let palette = Palette {
            alive: Color::Yellow,
            dead: Color::Blue,
        };
        assert_eq!(palette.color_for(true), Color::Yellow);
        assert_eq!(palette.color_for(false), Color::Blue);
        assert_eq!(Palette::default().color_for(true), Color::White);
    }

    #[test]
    fn test_frame_area_centers_board() {
        let area = Rect::new(0, 0, 100, 40);
        let board = frame_area(area, 10, 10);
        assert_eq!(board, Rect::new(39, 14, 22, 12));
    }

    #[test]
    fn test_frame_area_clips_to_terminal() {
        let area = Rect::new(5, 3, 50, 20);
        let board = frame_area(area, 100, 100);
        assert_eq!(board, area);
    }

    #[test]
    fn test_grid_lines_bottom_up() {
        let mut grid = Grid::new(10, 10);
        grid.set(0, 0, true);
        let palette = Palette::default();
        let lines = grid_lines(&grid, &palette);

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[9].spans.len(), 10);
        assert_eq!(lines[9].spans[0].style.fg, Some(Color::White));
        assert_eq!(lines[9].spans[1].style.fg, Some(Color::Black));
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Black));
    }

    #[test]
    fn test_help_text_matches_state() {
        assert!(help_text(RunState::Stopped).contains("Start"));
        assert!(!help_text(RunState::Stopped).contains("Stop"));
        assert!(help_text(RunState::Running).contains("Pause"));
        assert!(help_text(RunState::Paused).contains("Step"));
    }

    #[test]
    fn test_stats_text_reports_state() {
        let mut universe = Universe::from_seed(Settings::default(), 9);
        let text = stats_text(&universe, MemoryUsage::default());
        assert!(text.contains("Generation: 0"));
        assert!(text.contains("Status: stopped"));

        universe.start().unwrap();
        universe.step().unwrap();
        let text = stats_text(&universe, MemoryUsage::default());
        assert!(text.contains("Generation: 1"));
        assert!(text.contains("Status: running"));
        assert!(text.contains("Grid: 10x10"));
    }
}
