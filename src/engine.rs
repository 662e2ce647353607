//! Generation stepping.
//!
//! A step runs in two phases: every neighbor count is taken from the current
//! grid first, then all next states are written into a fresh grid. No cell sees
//! another cell's updated state within the same generation.

use crate::grid::Grid;

/// Cells born and cells that died during one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub births: u64,
    pub deaths: u64,
}

/// Conway's rule: survive on 2 or 3 neighbors, birth on exactly 3.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, n) if n < 2 => false,
        (true, 2) | (true, 3) => true,
        (true, _) => false,
        (false, 3) => true,
        (false, _) => false,
    }
}

/// Advances `grid` by one generation.
pub fn step(grid: &Grid) -> Grid {
    advance(grid).0
}

/// Advances `grid` by one generation and reports how many cells flipped.
pub fn advance(grid: &Grid) -> (Grid, Changes) {
    let (columns, rows) = (grid.columns(), grid.rows());

    let counts: Vec<u8> = (0..rows)
        .flat_map(|y| (0..columns).map(move |x| (x, y)))
        .map(|(x, y)| grid.count_alive_neighbors(x, y))
        .collect();

    let mut next = Grid::new(columns, rows);
    let mut changes = Changes::default();

    for ((x, y, alive), &neighbors) in grid.cells().zip(&counts) {
        let new_state = next_state(alive, neighbors);
        match (alive, new_state) {
            (false, true) => changes.births += 1,
            (true, false) => changes.deaths += 1,
            _ => {}
        }
        next.set(x, y, new_state);
    }

    (next, changes)
}
