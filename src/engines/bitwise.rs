use crate::{Grid, LifeEngine};

/// Engine that packs each row into `u64` words (one bit per cell) and
/// computes 64 cells at a time with a bit-sliced adder network.
/// Its performance is pattern-oblivious.
///
/// Works for any side length: rows are `ceil(n / 64)` words long, the
/// unused high bits of the last word are kept at zero and the wrap
/// between column `n - 1` and column `0` is stitched explicitly.
///
/// # Example
///
/// ```rust
/// use gol_census::{BitwiseEngine, Grid, LifeEngine, NaiveEngine};
///
/// let grid = Grid::random(100, 0.3, Some(1)).unwrap();
/// assert_eq!(BitwiseEngine.step(&grid), NaiveEngine.step(&grid));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BitwiseEngine;

/// Grid contents in packed form, `words` words per row.
struct PackedRows {
    n: usize,
    words: usize,
    data: Vec<u64>,
}

impl PackedRows {
    const CELLS_IN_CHUNK: usize = 64;

    fn pack(grid: &Grid) -> Self {
        let n = grid.size();
        let words = n.div_ceil(Self::CELLS_IN_CHUNK);
        let mut data = vec![0u64; n * words];
        for (y, row) in grid.rows().enumerate() {
            let dst = &mut data[y * words..(y + 1) * words];
            for (x, &alive) in row.iter().enumerate() {
                dst[x / Self::CELLS_IN_CHUNK] |= (alive as u64) << (x % Self::CELLS_IN_CHUNK);
            }
        }
        Self { n, words, data }
    }

    fn unpack_into(&self, grid: &mut Grid) {
        let (n, words) = (self.n, self.words);
        for (y, row) in grid.cells_mut().chunks_mut(n).enumerate() {
            let src = &self.data[y * words..(y + 1) * words];
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = (src[x / Self::CELLS_IN_CHUNK] >> (x % Self::CELLS_IN_CHUNK)) & 1 == 1;
            }
        }
    }

    fn row(&self, y: usize) -> &[u64] {
        &self.data[y * self.words..(y + 1) * self.words]
    }

    /// Mask of the meaningful bits of the last word in a row.
    fn tail_mask(&self) -> u64 {
        match self.n % Self::CELLS_IN_CHUNK {
            0 => u64::MAX,
            r => (1u64 << r) - 1,
        }
    }

    /// Bit `x` of the result holds cell `x - 1 (mod n)` of `row`.
    fn shifted_from_left(&self, row: &[u64], dst: &mut [u64]) {
        let shift = Self::CELLS_IN_CHUNK - 1;
        let last = self.words - 1;
        for k in 0..self.words {
            let carry = if k > 0 { row[k - 1] >> shift } else { 0 };
            dst[k] = (row[k] << 1) | carry;
        }
        dst[last] &= self.tail_mask();
        let top = self.n - 1;
        dst[0] |= (row[top / Self::CELLS_IN_CHUNK] >> (top % Self::CELLS_IN_CHUNK)) & 1;
    }

    /// Bit `x` of the result holds cell `x + 1 (mod n)` of `row`.
    fn shifted_from_right(&self, row: &[u64], dst: &mut [u64]) {
        let shift = Self::CELLS_IN_CHUNK - 1;
        let last = self.words - 1;
        for k in 0..self.words {
            let carry = if k < last { row[k + 1] << shift } else { 0 };
            dst[k] = (row[k] >> 1) | carry;
        }
        let top = self.n - 1;
        dst[top / Self::CELLS_IN_CHUNK] |= (row[0] & 1) << (top % Self::CELLS_IN_CHUNK);
    }
}

impl BitwiseEngine {
    /// Sums the eight neighbor bits `a..h` lane-wise and applies B3/S23
    /// to the center bits `i`.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn update_word(a: u64, b: u64, c: u64, d: u64, e: u64, f: u64, g: u64, h: u64, i: u64) -> u64 {
        let (ab0, ab1, cd0, cd1) = (a ^ b, a & b, c ^ d, c & d);
        let (ef0, ef1, gh0, gh1) = (e ^ f, e & f, g ^ h, g & h);
        let (ad0, ad1, ad2) = (ab0 ^ cd0, ab1 ^ cd1 ^ (ab0 & cd0), ab1 & cd1);
        let (eh0, eh1, eh2) = (ef0 ^ gh0, ef1 ^ gh1 ^ (ef0 & gh0), ef1 & gh1);
        let (ah0, xx, yy) = (ad0 ^ eh0, ad0 & eh0, ad1 ^ eh1);
        let (ah1, ah23) = (xx ^ yy, ad2 | eh2 | (ad1 & eh1) | (xx & yy));
        let z = !ah23 & ah1;
        let (i2, i3) = (!ah0 & z, ah0 & z);
        (i & i2) | i3
    }
}

impl LifeEngine for BitwiseEngine {
    fn name(&self) -> &'static str {
        "bitwise"
    }

    fn step(&self, grid: &Grid) -> Grid {
        let src = PackedRows::pack(grid);
        let (n, w) = (src.n, src.words);

        let mut left = vec![0u64; n * w];
        let mut right = vec![0u64; n * w];
        for y in 0..n {
            src.shifted_from_left(src.row(y), &mut left[y * w..(y + 1) * w]);
            src.shifted_from_right(src.row(y), &mut right[y * w..(y + 1) * w]);
        }

        let mut dst = PackedRows {
            n,
            words: w,
            data: vec![0u64; n * w],
        };
        for y in 0..n {
            let (yp, yn) = ((y + n - 1) % n, (y + 1) % n);
            for x in 0..w {
                let (prev, curr, next) = (yp * w + x, y * w + x, yn * w + x);
                dst.data[curr] = Self::update_word(
                    left[prev],
                    src.data[prev],
                    right[prev],
                    right[curr],
                    right[next],
                    src.data[next],
                    left[next],
                    left[curr],
                    src.data[curr],
                );
            }
            dst.data[y * w + w - 1] &= src.tail_mask();
        }

        let mut next = grid.clone();
        dst.unpack_into(&mut next);
        next
    }
}
