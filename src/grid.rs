use crate::{Error, PatternMask, Result};
use rand::{Rng, SeedableRng};
use std::fmt;

/// A square `n x n` field of cells whose opposite edges are stitched together.
///
/// Only neighbor lookups wrap; pattern windows (see [`Grid::matches_at`])
/// are clipped to the field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    n: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Relative positions of the eight Moore neighbors as `(d_row, d_col)`.
    pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];

    /// Creates a blank grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGridSize`] if `n` is zero.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidGridSize(n));
        }
        Ok(Self {
            n,
            cells: vec![false; n * n],
        })
    }

    /// Creates a grid where each cell is alive independently with
    /// probability `alive_probability`.
    ///
    /// # Arguments
    ///
    /// * `n` - Side length of the grid.
    /// * `alive_probability` - Chance of each cell being alive, in `[0, 1]`.
    /// * `seed` - Optional seed for the random number generator.
    ///   If None, seeds from the OS.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidGridSize`] if `n` is zero
    /// - [`Error::InvalidProbability`] if the probability is NaN or outside `[0, 1]`
    pub fn random(n: usize, alive_probability: f64, seed: Option<u64>) -> Result<Self> {
        if !(0.0..=1.0).contains(&alive_probability) {
            return Err(Error::InvalidProbability(alive_probability));
        }
        let mut grid = Self::new(n)?;
        let mut rng = if let Some(x) = seed {
            rand_chacha::ChaCha8Rng::seed_from_u64(x)
        } else {
            rand_chacha::ChaCha8Rng::from_os_rng()
        };
        for cell in grid.cells.iter_mut() {
            *cell = rng.random_bool(alive_probability);
        }
        Ok(grid)
    }

    /// Builds a grid from rows of `0`/`1` values.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidGridSize`] if there are no rows
    /// - [`Error::DimensionMismatch`] if any row's length differs from the row count
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self> {
        let mut grid = Self::new(rows.len())?;
        for (row, values) in rows.iter().enumerate() {
            if values.len() != grid.n {
                return Err(Error::DimensionMismatch {
                    row,
                    expected: grid.n,
                    got: values.len(),
                });
            }
            for (col, &v) in values.iter().enumerate() {
                grid.set(row, col, v != 0);
            }
        }
        Ok(grid)
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Returns the cell at `(row, col)`. Panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.n && col < self.n);
        self.cells[row * self.n + col]
    }

    /// Sets the cell at `(row, col)`. Panics when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        assert!(row < self.n && col < self.n);
        self.cells[row * self.n + col] = alive;
    }

    /// Returns the cell at `(row + d_row, col + d_col)` modulo the side length.
    pub fn get_wrapped(&self, row: usize, col: usize, d_row: isize, d_col: isize) -> bool {
        let n = self.n as isize;
        let r = (row as isize + d_row).rem_euclid(n) as usize;
        let c = (col as isize + d_col).rem_euclid(n) as usize;
        self.cells[r * self.n + c]
    }

    /// Counts alive cells among the eight toroidal neighbors of `(row, col)`.
    ///
    /// On grids with `n <= 2` several offsets land on the same cell (or on
    /// the cell itself) and each landing is counted, so the result may
    /// include the cell's own state.
    pub fn neighbor_count(&self, row: usize, col: usize) -> u8 {
        Self::NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dr, dc)| self.get_wrapped(row, col, dr, dc))
            .count() as u8
    }

    /// Copies every cell of `mask` (alive and dead) onto the grid with its
    /// top-left corner at `(row, col)`, wrapping around the edges.
    /// Anchors past the edge are reduced modulo the side length.
    pub fn place(&mut self, mask: &PatternMask, row: usize, col: usize) {
        let (row, col) = (row % self.n, col % self.n);
        for (i, mask_row) in mask.rows().enumerate() {
            for (j, &cell) in mask_row.iter().enumerate() {
                let (r, c) = ((row + i % self.n) % self.n, (col + j % self.n) % self.n);
                self.cells[r * self.n + c] = cell;
            }
        }
    }

    /// Returns `true` if the window anchored at `(row, col)` equals `mask`
    /// cell for cell. Windows that would cross the edge never match.
    pub fn matches_at(&self, mask: &PatternMask, row: usize, col: usize) -> bool {
        let (h, w) = (mask.height(), mask.width());
        if row >= self.n || col >= self.n || h > self.n - row || w > self.n - col {
            return false;
        }
        mask.rows().enumerate().all(|(i, mask_row)| {
            let start = (row + i) * self.n + col;
            self.cells[start..start + w] == *mask_row
        })
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Row-major view of the cells.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Iterates over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.n)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }
}

impl fmt::Display for Grid {
    /// Renders alive cells as `*` and dead cells as `.`, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &cell in row {
                f.write_str(if cell { "*" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
