//! Cell-state storage for the Game of Life board

use crate::config::{CellPitch, CellSize, Layout, Viewport};
use crate::error::GridError;
use rand::Rng;

/// Rectangular board of alive/dead cells, addressed by (row, col)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<bool>>,
}

impl Grid {
    /// All-dead grid of the given size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![false; cols]; rows],
        }
    }

    /// Size a grid to fill the viewport. Small viewports yield an empty grid.
    pub fn build(viewport: Viewport, pitch: CellPitch, padding: CellSize) -> Self {
        let rows = Layout::fit(viewport.height, padding.height, pitch.height);
        let cols = Layout::fit(viewport.width, padding.width, pitch.width);
        Self::new(rows, cols)
    }

    /// Build a grid from explicit rows. Returns `None` if rows differ in length.
    pub fn from_rows(cells: Vec<Vec<bool>>) -> Option<Self> {
        let cols = cells.first().map_or(0, Vec::len);
        if cells.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Self {
            rows: cells.len(),
            cols,
            cells,
        })
    }

    /// Overwrite every cell: alive with probability `live_probability`
    pub fn reseed<R: Rng>(&mut self, live_probability: f64, rng: &mut R) {
        // gen_bool panics on NaN
        let p = if live_probability.is_finite() {
            live_probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                *cell = rng.gen_bool(p);
            }
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool, GridError> {
        self.check(row, col)?;
        Ok(self.cells[row][col])
    }

    /// Flip one cell, returning its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool, GridError> {
        self.check(row, col)?;
        let cell = &mut self.cells[row][col];
        *cell = !*cell;
        Ok(*cell)
    }

    /// Write a cell. Only the simulator's apply phase goes through here.
    pub(crate) fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        self.check(row, col)?;
        self.cells[row][col] = alive;
        Ok(())
    }

    /// (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&alive| alive).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Unchecked read for positions already known to be in bounds
    #[inline]
    pub(crate) fn alive_at(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    fn check(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VIEWPORT_PADDING;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn build_fills_viewport_minus_margin() {
        let grid = Grid::build(Viewport::new(80, 24), CellPitch::default(), VIEWPORT_PADDING);
        assert_eq!(grid.dimensions(), (21, 25));
        assert_eq!(grid.live_count(), 0);
        assert!(grid.rows().all(|row| row.len() == 25));
    }

    #[test]
    fn tiny_viewport_builds_empty_grid() {
        let cases = [
            ((0, 0), (0, 0)),
            ((3, 3), (0, 0)),
            ((5, 100), (97, 0)),
            ((100, 3), (0, 31)),
        ];
        for ((w, h), dims) in cases {
            let grid = Grid::build(Viewport::new(w, h), CellPitch::default(), VIEWPORT_PADDING);
            assert_eq!(grid.dimensions(), dims, "viewport {w}x{h}");
            assert!(grid.is_empty());
            assert_eq!(grid.rows().count(), dims.0);
            assert_eq!(grid.live_count(), 0);
        }
    }

    #[test]
    fn columnless_grid_keeps_its_rows() {
        let mut grid = Grid::new(4, 0);
        assert_eq!(grid.dimensions(), (4, 0));
        assert!(grid.rows().all(<[bool]>::is_empty));
        assert!(grid.get(0, 0).is_err());
        assert!(grid.toggle(3, 0).is_err());

        let mut rng = StdRng::seed_from_u64(1);
        grid.reseed(1.0, &mut rng);
        assert_eq!(grid.live_count(), 0);

        let from_rows = Grid::from_rows(vec![Vec::new(); 3]).unwrap();
        assert_eq!(from_rows.dimensions(), (3, 0));
    }

    #[test]
    fn non_finite_probability_seeds_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut grid = Grid::new(6, 6);
        grid.reseed(f64::NAN, &mut rng);
        assert_eq!(grid.live_count(), 0);
        grid.reseed(f64::INFINITY, &mut rng);
        assert_eq!(grid.live_count(), 0);
        grid.reseed(2.5, &mut rng);
        assert_eq!(grid.live_count(), 36);
    }

    #[test]
    fn get_outside_bounds_fails() {
        let grid = Grid::new(2, 3);
        assert_eq!(grid.get(1, 2), Ok(false));
        assert_eq!(
            grid.get(2, 0),
            Err(GridError::OutOfBounds { row: 2, col: 0, rows: 2, cols: 3 })
        );
        assert!(grid.get(0, 3).is_err());
    }

    #[test]
    fn toggle_twice_restores_cell() {
        let mut grid = Grid::new(3, 3);
        assert_eq!(grid.toggle(1, 1), Ok(true));
        assert_eq!(grid.get(1, 1), Ok(true));
        assert_eq!(grid.toggle(1, 1), Ok(false));
        assert_eq!(grid, Grid::new(3, 3));
    }

    #[test]
    fn toggle_outside_bounds_leaves_grid_alone() {
        let mut grid = Grid::new(2, 2);
        assert!(grid.toggle(5, 0).is_err());
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn reseed_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        for (rows, cols) in [(1, 1), (4, 9), (17, 3)] {
            let mut grid = Grid::new(rows, cols);
            grid.reseed(1.0, &mut rng);
            assert_eq!(grid.live_count(), rows * cols);
            grid.reseed(0.0, &mut rng);
            assert_eq!(grid.live_count(), 0);
        }
    }

    #[test]
    fn reseed_density_is_roughly_respected() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::new(100, 100);
        grid.reseed(0.3, &mut rng);
        let live = grid.live_count();
        assert!((2500..3500).contains(&live), "live = {live}");
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(Grid::from_rows(vec![vec![true, false], vec![true]]).is_none());
        let grid = Grid::from_rows(vec![vec![true, false], vec![false, false]]).unwrap();
        assert_eq!(grid.dimensions(), (2, 2));
        assert_eq!(grid.live_count(), 1);
    }
}
