//! Flat grid of cell states.
//!
//! Coordinates are `(x, y)` with `x` the column in `0..columns` and `y` the row
//! in `0..rows`. Storage is row-major. The grid does not wrap: positions past an
//! edge simply do not exist.

use rand::Rng;

/// Moore neighborhood offsets, center excluded.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<bool>,
    columns: usize,
    rows: usize,
}

impl Grid {
    /// Creates an all-dead grid.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            cells: vec![false; columns * rows],
            columns,
            rows,
        }
    }

    /// Creates a grid where each cell independently starts alive with
    /// probability `chance`.
    ///
    /// `chance` is clamped to `[0, 1]`; NaN counts as 0 so every cell starts dead.
    pub fn seeded<R: Rng + ?Sized>(columns: usize, rows: usize, chance: f32, rng: &mut R) -> Self {
        let chance = if chance.is_nan() {
            0.0
        } else {
            f64::from(chance).clamp(0.0, 1.0)
        };
        let cells = (0..columns * rows).map(|_| rng.gen_bool(chance)).collect();
        Self {
            cells,
            columns,
            rows,
        }
    }

    /// Width of the grid in cells.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Height of the grid in cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.columns && y < self.rows,
            "cell ({x}, {y}) is outside a {}x{} grid",
            self.columns,
            self.rows
        );
        y * self.columns + x
    }

    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.idx(x, y)]
    }

    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let i = self.idx(x, y);
        self.cells[i] = alive;
    }

    /// In-bounds Moore neighbors of `(x, y)`. Corners have 3, edges 5.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            (nx < self.columns && ny < self.rows).then_some((nx, ny))
        })
    }

    /// Number of live cells among the in-bounds Moore neighbors, in `0..=8`.
    pub fn count_alive_neighbors(&self, x: usize, y: usize) -> u8 {
        self.neighbors(x, y)
            .filter(|&(nx, ny)| self.get(nx, ny))
            .count() as u8
    }

    /// Counts the living cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// All cells as `(x, y, alive)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &alive)| (i % self.columns, i / self.columns, alive))
    }

    /// One row of cells, left to right.
    pub fn row(&self, y: usize) -> &[bool] {
        let start = self.idx(0, y);
        &self.cells[start..start + self.columns]
    }

    /// Builds a grid from text rows where `#` or `O` is alive and anything else
    /// is dead. The first string is row 0.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let columns = rows.first().map_or(0, |r| r.chars().count());
        let mut grid = Self::new(columns, rows.len());
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), columns, "ragged pattern row {y}");
            for (x, c) in row.chars().enumerate() {
                grid.set(x, y, matches!(c, '#' | 'O'));
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(12, 10);
        assert_eq!(grid.columns(), 12);
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.cells().count(), 120);
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::new(10, 10);
        grid.set(3, 7, true);
        assert!(grid.get(3, 7));
        assert!(!grid.get(7, 3));
        grid.set(3, 7, false);
        assert!(!grid.get(3, 7));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_bounds_panics() {
        let grid = Grid::new(10, 10);
        grid.get(10, 0);
    }

    #[test]
    fn test_corner_does_not_wrap() {
        let mut grid = Grid::new(10, 10);
        // Opposite corners and edges; a toroidal grid would count these.
        grid.set(9, 9, true);
        grid.set(9, 0, true);
        grid.set(0, 9, true);
        assert_eq!(grid.count_alive_neighbors(0, 0), 0);
        assert_eq!(grid.neighbors(0, 0).count(), 3);

        grid.set(1, 0, true);
        grid.set(0, 1, true);
        grid.set(1, 1, true);
        assert_eq!(grid.count_alive_neighbors(0, 0), 3);
    }

    #[test]
    fn test_neighbor_counts_by_position() {
        let grid = Grid::new(10, 10);
        assert_eq!(grid.neighbors(0, 0).count(), 3);
        assert_eq!(grid.neighbors(9, 9).count(), 3);
        assert_eq!(grid.neighbors(5, 0).count(), 5);
        assert_eq!(grid.neighbors(0, 5).count(), 5);
        assert_eq!(grid.neighbors(5, 5).count(), 8);
    }

    #[test]
    fn test_center_not_counted() {
        let grid = Grid::from_rows(&[
            "###",
            "###",
            "###",
        ]);
        assert_eq!(grid.count_alive_neighbors(1, 1), 8);
        assert_eq!(grid.count_alive_neighbors(0, 0), 3);
        assert_eq!(grid.count_alive_neighbors(1, 0), 5);
    }

    #[test]
    fn test_seeded_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(Grid::seeded(10, 10, 0.0, &mut rng).population(), 0);
        assert_eq!(Grid::seeded(10, 10, 1.0, &mut rng).population(), 100);
    }

    #[test]
    fn test_seeded_out_of_range_chance() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(Grid::seeded(10, 10, f32::NAN, &mut rng).population(), 0);
        assert_eq!(Grid::seeded(10, 10, -0.5, &mut rng).population(), 0);
        assert_eq!(Grid::seeded(10, 10, 2.0, &mut rng).population(), 100);
        assert_eq!(Grid::seeded(10, 10, f32::INFINITY, &mut rng).population(), 100);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = Grid::seeded(20, 20, 0.3, &mut ChaCha8Rng::seed_from_u64(42));
        let b = Grid::seeded(20, 20, 0.3, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_density() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grid = Grid::seeded(100, 100, 0.3, &mut rng);
        let density = grid.population() as f64 / 10_000.0;
        assert!((0.25..0.35).contains(&density), "density {density}");
    }

    #[test]
    fn test_cells_and_rows_agree() {
        let grid = Grid::from_rows(&[
            "#..",
            ".#.",
        ]);
        let alive: Vec<_> = grid
            .cells()
            .filter(|&(_, _, alive)| alive)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(alive, vec![(0, 0), (1, 1)]);
        assert_eq!(grid.row(1), &[false, true, false]);
    }

    proptest! {
        #[test]
        fn prop_neighbor_count_in_range(
            cells in proptest::collection::vec(any::<bool>(), 100),
            x in 0usize..10,
            y in 0usize..10,
        ) {
            let mut grid = Grid::new(10, 10);
            for (i, alive) in cells.into_iter().enumerate() {
                grid.set(i % 10, i / 10, alive);
            }
            let n = grid.count_alive_neighbors(x, y);
            prop_assert!(n <= 8);
            prop_assert!(n as usize <= grid.neighbors(x, y).count());
        }
    }
}
