use crate::{Grid, PatternLibrary, PatternMask, Result};
use rayon::prelude::*;

/// Counts exact occurrences of any of `variants` on `grid`.
///
/// Every variant is slid over every anchor `(i, j)` with
/// `0 <= i <= n - height` and `0 <= j <= n - width`; the window itself never
/// wraps around the edges. Each anchor whose window equals the variant cell
/// for cell (dead cells included) adds one. Overlapping windows and matches
/// of different variants at the same anchor are all counted.
/// A variant larger than the grid contributes nothing.
pub fn count(grid: &Grid, variants: &[PatternMask]) -> usize {
    let n = grid.size();
    variants
        .iter()
        .filter(|mask| mask.height() <= n && mask.width() <= n)
        .map(|mask| {
            let mut found = 0usize;
            for i in 0..=n - mask.height() {
                for j in 0..=n - mask.width() {
                    if grid.matches_at(mask, i, j) {
                        found += 1;
                    }
                }
            }
            found
        })
        .sum()
}

/// Counts the pattern registered under `name`.
///
/// # Errors
///
/// Returns [`crate::Error::UnknownPattern`] if `name` is not registered.
pub fn count_named(grid: &Grid, library: &PatternLibrary, name: &str) -> Result<usize> {
    Ok(count(grid, library.variants_of(name)?))
}

/// Counts every pattern of `library` on `grid`.
///
/// Patterns are independent of each other, so they are counted in parallel;
/// the result keeps the library order.
pub fn count_all(grid: &Grid, library: &PatternLibrary) -> Census {
    let counts = library
        .entries()
        .par_iter()
        .map(|entry| (entry.name().to_owned(), count(grid, entry.variants())))
        .collect();
    Census { counts }
}

/// Occurrence counts of every library pattern in one generation,
/// in library order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Census {
    counts: Vec<(String, usize)>,
}

impl Census {
    /// Count for `name`, or `None` if the pattern was not part of the census.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, count)| count)
    }

    /// `(name, count)` pairs in library order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(n, c)| (n.as_str(), *c))
    }

    /// Sum over all patterns.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|&(_, c)| c).sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn mask(rows: &[&[u8]]) -> PatternMask {
        PatternMask::from_rows(rows).unwrap()
    }

    #[test]
    fn test_single_and_double_block() {
        let library = PatternLibrary::standard();
        let block = library.variants_of("Block").unwrap();
        let mut grid = Grid::new(10).unwrap();
        grid.place(&block[0], 2, 2);
        assert_eq!(count(&grid, block), 1);
        grid.place(&block[0], 6, 6);
        assert_eq!(count(&grid, block), 2);
    }

    #[test]
    fn test_dead_cells_are_literal() {
        // a 2x2 block mask has no dead margin, so it also matches inside a 3x3 solid square
        let block = [mask(&[&[1, 1], &[1, 1]])];
        let mut grid = Grid::new(6).unwrap();
        grid.place(&mask(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]), 1, 1);
        assert_eq!(count(&grid, &block), 4);

        // a mask with a dead center rejects the solid square
        let ring = [mask(&[&[1, 1, 1], &[1, 0, 1], &[1, 1, 1]])];
        assert_eq!(count(&grid, &ring), 0);
    }

    #[test]
    fn test_window_does_not_wrap() {
        let blinker = mask(&[&[1, 1, 1]]).variants();
        let mut grid = Grid::new(8).unwrap();
        grid.place(&blinker[0], 3, 7);
        assert_eq!(count(&grid, &blinker), 0);
        grid.place(&blinker[0], 3, 5);
        assert_eq!(count(&grid, &blinker), 1);
    }

    #[test]
    fn test_variants_counted_independently() {
        // a plus sign holds a horizontal and a vertical blinker-shaped run
        let blinker = mask(&[&[1, 1, 1]]).variants();
        let mut grid = Grid::new(7).unwrap();
        grid.place(&mask(&[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]]), 2, 2);
        assert_eq!(count(&grid, &blinker), 2);
    }

    #[test]
    fn test_oversized_mask_counts_zero() {
        let library = PatternLibrary::standard();
        let grid = Grid::random(5, 0.5, Some(1)).unwrap();
        assert_eq!(count_named(&grid, &library, "Pulsar").unwrap(), 0);
    }

    #[test]
    fn test_count_all_follows_library_order() {
        let library = PatternLibrary::standard();
        let grid = Grid::random(20, 0.3, Some(3)).unwrap();
        let census = count_all(&grid, &library);
        assert_eq!(census.len(), library.len());
        for ((name, value), expected) in census.iter().zip(library.names()) {
            assert_eq!(name, expected);
            assert_eq!(value, count_named(&grid, &library, name).unwrap());
        }
        assert_eq!(census.total(), census.iter().map(|(_, c)| c).sum::<usize>());
    }

    #[test]
    fn test_count_named_unknown() {
        let library = PatternLibrary::new();
        let grid = Grid::new(4).unwrap();
        assert_eq!(
            count_named(&grid, &library, "Block"),
            Err(Error::UnknownPattern("Block".to_owned()))
        );
        assert!(count_all(&grid, &library).is_empty());
    }

    #[test]
    fn test_census_get() {
        let library = PatternLibrary::standard();
        let mut grid = Grid::new(10).unwrap();
        grid.place(library.variants_of("Block").unwrap().first().unwrap(), 2, 2);
        let census = count_all(&grid, &library);
        assert_eq!(census.get("Block"), Some(1));
        assert_eq!(census.get("Glider"), Some(0));
        assert_eq!(census.get("Nope"), None);
    }
}
