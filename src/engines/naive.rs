use crate::{Grid, LifeEngine};

/// Reference engine: visits every cell and sums its neighbors through
/// [`Grid::NEIGHBOR_OFFSETS`] with modular indexing.
///
/// Simple enough to be obviously correct, used as the ground truth
/// for the other engines.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaiveEngine;

impl NaiveEngine {
    /// B3/S23
    fn next_state(alive: bool, neighbors: u8) -> bool {
        matches!((alive, neighbors), (true, 2) | (_, 3))
    }
}

impl LifeEngine for NaiveEngine {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn step(&self, grid: &Grid) -> Grid {
        let n = grid.size();
        let mut next = grid.clone();
        let dst = next.cells_mut();
        for row in 0..n {
            for col in 0..n {
                let neighbors = grid.neighbor_count(row, col);
                dst[row * n + col] = Self::next_state(grid.get(row, col), neighbors);
            }
        }
        next
    }
}
