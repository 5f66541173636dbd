//! Game of Life transition rule and run clock

use crate::config::TICK_INTERVAL;
use crate::grid::Grid;
use std::time::Duration;

/// Offsets of the 8 surrounding positions, (d_row, d_col)
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// A scheduled change to one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Birth { row: usize, col: usize },
    Death { row: usize, col: usize },
}

/// What one generation changed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub births: usize,
    pub deaths: usize,
}

impl StepReport {
    pub fn changed(&self) -> bool {
        self.births + self.deaths > 0
    }
}

/// Count live cells around (row, col). Edges are hard: positions off the
/// grid count as dead.
#[inline]
pub fn count_alive_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let (rows, cols) = grid.dimensions();
    let mut count = 0u8;
    for (dr, dc) in NEIGHBOR_OFFSETS {
        let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
            continue;
        };
        if r < rows && c < cols && grid.alive_at(r, c) {
            count += 1;
        }
    }
    count
}

/// Evaluate every cell against the current grid without touching it
pub fn plan(grid: &Grid) -> Vec<Mutation> {
    let mut mutations = Vec::new();
    for (row, cells) in grid.rows().enumerate() {
        for (col, &alive) in cells.iter().enumerate() {
            let neighbors = count_alive_neighbors(grid, row, col);
            match (alive, neighbors) {
                (true, 2) | (true, 3) => {}
                (true, _) => mutations.push(Mutation::Death { row, col }),
                (false, 3) => mutations.push(Mutation::Birth { row, col }),
                (false, _) => {}
            }
        }
    }
    mutations
}

/// Advance the grid one generation.
///
/// All births and deaths are decided from the pre-step state and only then
/// written back, so no cell sees a neighbor's next-generation value.
pub fn step(grid: &mut Grid) -> StepReport {
    let mutations = plan(grid);
    let mut report = StepReport::default();
    for mutation in mutations {
        // positions come from iterating this same grid, so they are in bounds
        let applied = match mutation {
            Mutation::Birth { row, col } => {
                report.births += 1;
                grid.set(row, col, true)
            }
            Mutation::Death { row, col } => {
                report.deaths += 1;
                grid.set(row, col, false)
            }
        };
        debug_assert!(applied.is_ok());
    }
    report
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}

/// Pause flag, tick interval and generation counter for the run loop
#[derive(Clone, Debug)]
pub struct SimulationClock {
    state: RunState,
    interval: Duration,
    generation: u64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationClock {
    pub fn new() -> Self {
        Self {
            state: RunState::Running,
            interval: TICK_INTERVAL,
            generation: 0,
        }
    }

    pub fn toggle_pause(&mut self) -> RunState {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
        self.state
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reset_generation(&mut self) {
        self.generation = 0;
    }

    /// One timer firing. Steps the grid only while running.
    pub fn tick(&mut self, grid: &mut Grid) -> Option<StepReport> {
        if self.is_paused() {
            return None;
        }
        let report = step(grid);
        self.generation += 1;
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_from(pattern: &[&str]) -> Grid {
        let rows = pattern
            .iter()
            .map(|line| line.chars().map(|c| c == '#').collect())
            .collect();
        Grid::from_rows(rows).expect("rectangular pattern")
    }

    #[test]
    fn neighbor_count_excludes_self() {
        let grid = grid_from(&["###", "###", "###"]);
        assert_eq!(count_alive_neighbors(&grid, 1, 1), 8);
        assert_eq!(count_alive_neighbors(&grid, 0, 0), 3);
        assert_eq!(count_alive_neighbors(&grid, 0, 1), 5);

        let lonely = grid_from(&["...", ".#.", "..."]);
        assert_eq!(count_alive_neighbors(&lonely, 1, 1), 0);
    }

    #[test]
    fn neighbor_count_does_not_wrap() {
        let grid = grid_from(&["#...#", ".....", "#...#"]);
        assert_eq!(count_alive_neighbors(&grid, 0, 0), 0);
        assert_eq!(count_alive_neighbors(&grid, 1, 0), 2);
        assert_eq!(count_alive_neighbors(&grid, 1, 2), 0);
    }

    #[test]
    fn neighbor_count_stays_within_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(12, 17);
        grid.reseed(0.5, &mut rng);
        let (rows, cols) = grid.dimensions();
        for row in 0..rows {
            for col in 0..cols {
                let n = count_alive_neighbors(&grid, row, col);
                assert!(n <= 8);
                // flipping the cell itself never changes its own count
                let mut flipped = grid.clone();
                flipped.toggle(row, col).unwrap();
                assert_eq!(count_alive_neighbors(&flipped, row, col), n);
            }
        }
    }

    #[test]
    fn survival_and_death_follow_neighbor_count() {
        for live_neighbors in 0..=8usize {
            // center alive, surrounded by `live_neighbors` live cells
            let mut grid = Grid::new(3, 3);
            grid.toggle(1, 1).unwrap();
            for &(dr, dc) in NEIGHBOR_OFFSETS.iter().take(live_neighbors) {
                grid.toggle((1 + dr) as usize, (1 + dc) as usize).unwrap();
            }
            step(&mut grid);
            let survives = live_neighbors == 2 || live_neighbors == 3;
            assert_eq!(grid.get(1, 1), Ok(survives), "{live_neighbors} neighbors");
        }
    }

    #[test]
    fn birth_needs_exactly_three() {
        for live_neighbors in 0..=8usize {
            let mut grid = Grid::new(3, 3);
            for &(dr, dc) in NEIGHBOR_OFFSETS.iter().take(live_neighbors) {
                grid.toggle((1 + dr) as usize, (1 + dc) as usize).unwrap();
            }
            step(&mut grid);
            assert_eq!(grid.get(1, 1), Ok(live_neighbors == 3), "{live_neighbors} neighbors");
        }
    }

    #[test]
    fn all_dead_grid_is_fixed_point() {
        let mut grid = Grid::new(6, 9);
        let report = step(&mut grid);
        assert!(!report.changed());
        assert_eq!(grid, Grid::new(6, 9));
    }

    #[test]
    fn blinker_rotates_in_one_step() {
        let mut grid = grid_from(&["...", "###", "..."]);
        let report = step(&mut grid);
        assert_eq!(grid, grid_from(&[".#.", ".#.", ".#."]));
        assert_eq!(report, StepReport { births: 2, deaths: 2 });

        step(&mut grid);
        assert_eq!(grid, grid_from(&["...", "###", "..."]));
    }

    #[test]
    fn block_is_still_life() {
        let block = grid_from(&["....", ".##.", ".##.", "...."]);
        let mut grid = block.clone();
        assert!(plan(&grid).is_empty());
        step(&mut grid);
        assert_eq!(grid, block);
    }

    #[test]
    fn glider_moves_diagonally() {
        let mut grid = grid_from(&[
            ".#....",
            "..#...",
            "###...",
            "......",
            "......",
            "......",
        ]);
        for _ in 0..4 {
            step(&mut grid);
        }
        assert_eq!(
            grid,
            grid_from(&[
                "......",
                "..#...",
                "...#..",
                ".###..",
                "......",
                "......",
            ])
        );
    }

    #[test]
    fn empty_grid_steps_without_effect() {
        for (rows, cols) in [(0, 0), (5, 0), (0, 5)] {
            let mut grid = Grid::new(rows, cols);
            assert_eq!(step(&mut grid), StepReport::default());
            assert_eq!(grid.dimensions(), (rows, cols));
        }
    }

    #[test]
    fn paused_clock_skips_step() {
        let mut grid = grid_from(&["...", "###", "..."]);
        let before = grid.clone();
        let mut clock = SimulationClock::new();
        assert_eq!(clock.toggle_pause(), RunState::Paused);
        assert_eq!(clock.tick(&mut grid), None);
        assert_eq!(grid, before);
        assert_eq!(clock.generation(), 0);

        clock.toggle_pause();
        assert!(clock.tick(&mut grid).is_some());
        assert_eq!(clock.generation(), 1);
        assert_ne!(grid, before);
    }

    #[test]
    fn double_pause_toggle_is_identity() {
        let mut grid = grid_from(&["#..", ".#.", "..#"]);
        let before = grid.clone();
        let mut clock = SimulationClock::new();
        let initial = clock.state();
        clock.toggle_pause();
        clock.toggle_pause();
        assert_eq!(clock.state(), initial);
        assert_eq!(initial, RunState::Running);
        assert_eq!(grid, before);
        assert_eq!(clock.interval(), Duration::from_millis(1000));
        // grid is untouched until a tick actually fires
        clock.tick(&mut grid);
        assert_ne!(grid, before);
    }
}
