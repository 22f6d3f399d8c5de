use crate::Grid;

/// Update rule for Conway's Game of Life (B3/S23) on a toroidal [`Grid`].
///
/// Implementations are pure: the input grid is only read and a freshly
/// computed grid is returned, so readers of the previous generation stay
/// valid. All implementations must produce identical results.
pub trait LifeEngine: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Computes the next generation.
    ///
    /// Every cell looks at its eight neighbors with coordinates taken modulo
    /// the side length. A live cell survives with 2 or 3 live neighbors,
    /// a dead cell is born with exactly 3, every other cell ends up dead.
    fn step(&self, grid: &Grid) -> Grid;

    /// Applies [`LifeEngine::step`] `generations` times.
    fn steps(&self, grid: &Grid, generations: u64) -> Grid {
        let mut current = grid.clone();
        for _ in 0..generations {
            current = self.step(&current);
        }
        current
    }
}

impl<T: LifeEngine + ?Sized> LifeEngine for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn step(&self, grid: &Grid) -> Grid {
        (**self).step(grid)
    }
}
