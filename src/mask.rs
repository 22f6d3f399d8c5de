use crate::{Error, Result};
use std::fmt;

/// One fixed orientation of a named pattern.
///
/// A mask is a dense `height x width` rectangle stored in row-major order.
/// Every cell is significant: alive cells must match alive grid cells and
/// dead cells must match dead grid cells, there is no "don't care" state.
///
/// Masks are immutable; the symmetry transforms return new masks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatternMask {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl PatternMask {
    /// Largest area accepted from an RLE header.
    pub const MAX_RLE_CELLS: usize = 1 << 24;

    /// Builds a mask from rows of `0`/`1` values, the way patterns are
    /// usually written down.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidMask`] if there are no rows or the first row is empty
    /// - [`Error::DimensionMismatch`] if the rows have different lengths
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if height == 0 || width == 0 {
            return Err(Error::InvalidMask { height, width });
        }
        let mut cells = Vec::with_capacity(height * width);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(Error::DimensionMismatch {
                    row,
                    expected: width,
                    got: values.len(),
                });
            }
            cells.extend(values.iter().map(|&v| v != 0));
        }
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Builds a mask from a row-major cell buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidMask`] if either dimension is zero
    /// - [`Error::DimensionMismatch`] if `cells.len() != height * width`
    pub fn from_cells(height: usize, width: usize, cells: Vec<bool>) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(Error::InvalidMask { height, width });
        }
        if cells.len() != height * width {
            return Err(Error::DimensionMismatch {
                row: 0,
                expected: height * width,
                got: cells.len(),
            });
        }
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the cell at `(row, col)`. Panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.height && col < self.width);
        self.cells[row * self.width + col]
    }

    /// Row-major view of the cells.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Iterates over the rows of the mask.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn build(height: usize, width: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                cells.push(f(row, col));
            }
        }
        Self {
            height,
            width,
            cells,
        }
    }

    /// Rotates the mask by 90° counter-clockwise; height and width swap.
    ///
    /// The first row of the result is the last column of `self`.
    pub fn rotate90(&self) -> Self {
        Self::build(self.width, self.height, |row, col| {
            self.get(col, self.width - 1 - row)
        })
    }

    /// Mirrors the mask left to right.
    pub fn flip_horizontal(&self) -> Self {
        Self::build(self.height, self.width, |row, col| {
            self.get(row, self.width - 1 - col)
        })
    }

    /// Mirrors the mask top to bottom.
    pub fn flip_vertical(&self) -> Self {
        Self::build(self.height, self.width, |row, col| {
            self.get(self.height - 1 - row, col)
        })
    }

    /// Returns every distinct orientation of the mask.
    ///
    /// Each of the four rotations contributes itself, its horizontal mirror
    /// and its vertical mirror. Structural duplicates are dropped and the
    /// first occurrence keeps its position, so the result always starts with
    /// the mask itself and holds between 1 and 8 masks.
    pub fn variants(&self) -> Vec<PatternMask> {
        let mut unique: Vec<PatternMask> = Vec::with_capacity(8);
        let mut rotated = self.clone();
        for _ in 0..4 {
            let next = rotated.rotate90();
            let mirrored = [rotated.flip_horizontal(), rotated.flip_vertical()];
            for candidate in std::iter::once(rotated).chain(mirrored) {
                if !unique.contains(&candidate) {
                    unique.push(candidate);
                }
            }
            rotated = next;
        }
        unique
    }

    /// Parses a mask from the RLE format
    /// (see https://conwaylife.com/wiki/Run_Length_Encoded).
    ///
    /// The mask is exactly `y` rows by `x` columns as declared in the header;
    /// cells not mentioned in the data are dead. Lines starting with `#`
    /// are comments. The rule, if present, must be `B3/S23`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRle`] for a missing or malformed header,
    /// an unsupported rule, a declared area above [`Self::MAX_RLE_CELLS`],
    /// data that runs past the declared bounds or an unknown character,
    /// and [`Error::InvalidMask`] for a zero-sized header.
    pub fn from_rle(data: &[u8]) -> Result<Self> {
        let invalid = |msg: String| Error::InvalidRle(msg);
        let mut lines = data
            .split(|&b| b == b'\n')
            .map(|x| x.strip_suffix(b"\r").unwrap_or(x))
            .filter(|x| !x.trim_ascii().is_empty() && x[0] != b'#');

        let line = lines
            .next()
            .ok_or_else(|| invalid("missing header".to_owned()))?;
        let mut parts = line.split(|&b| b == b',').map(|x| x.trim_ascii());

        let extract_value = |part: Option<&[u8]>, expected_key: &str| -> Result<String> {
            let part = part.ok_or_else(|| invalid(format!("missing \"{expected_key}\"")))?;
            let mut items = part.split(|&b| b == b'=');
            let key = items.next().unwrap_or(&[]).trim_ascii();
            if key != expected_key.as_bytes() {
                return Err(invalid(format!(
                    "expected {}, got {}",
                    expected_key,
                    String::from_utf8_lossy(key)
                )));
            }
            let value = items.next().unwrap_or(&[]).trim_ascii();
            if items.next().is_some() {
                return Err(invalid("missing ',' between '='".to_owned()));
            }
            Ok(String::from_utf8_lossy(value).into_owned())
        };
        let parse_dim = |value: String| -> Result<usize> {
            value
                .parse()
                .map_err(|_| invalid(format!("bad dimension {value:?}")))
        };

        let width = parse_dim(extract_value(parts.next(), "x")?)?;
        let height = parse_dim(extract_value(parts.next(), "y")?)?;
        // rule is optional
        if let Some(part) = parts.next() {
            let rule = extract_value(Some(part), "rule")?;
            if !rule.eq_ignore_ascii_case("B3/S23") {
                return Err(invalid(format!("unsupported rule {rule}")));
            }
        }
        if height == 0 || width == 0 {
            return Err(Error::InvalidMask { height, width });
        }
        let area = height
            .checked_mul(width)
            .filter(|&area| area <= Self::MAX_RLE_CELLS)
            .ok_or_else(|| invalid(format!("pattern too large: {width}x{height}")))?;

        let overflow = || invalid("run length overflow".to_owned());
        let mut cells = vec![false; area];
        let (mut x, mut y, mut count) = (0usize, 0usize, 0usize);
        'outer: for line in lines {
            for &b in line {
                match b {
                    b'0'..=b'9' => {
                        count = count
                            .checked_mul(10)
                            .and_then(|c| c.checked_add((b - b'0') as usize))
                            .ok_or_else(overflow)?;
                    }
                    b'b' | b'.' => {
                        x = x.checked_add(count.max(1)).ok_or_else(overflow)?;
                        count = 0;
                    }
                    b'o' | b'*' => {
                        let c = count.max(1);
                        let end = x.checked_add(c).ok_or_else(overflow)?;
                        if end > width || y >= height {
                            return Err(invalid(format!(
                                "data out of bounds: x = {}, y = {}",
                                end - 1,
                                y
                            )));
                        }
                        cells[y * width + x..y * width + end].fill(true);
                        x = end;
                        count = 0;
                    }
                    b'$' => {
                        y = y.checked_add(count.max(1)).ok_or_else(overflow)?;
                        x = 0;
                        count = 0;
                    }
                    b'!' => break 'outer,
                    b' ' | b'\t' => continue,
                    _ => return Err(invalid(format!("invalid character '{}'", b as char))),
                }
                if x > width {
                    return Err(invalid(format!("data out of bounds: x = {}, y = {}", x, y)));
                }
            }
        }

        Ok(Self {
            height,
            width,
            cells,
        })
    }
}

impl fmt::Display for PatternMask {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn glider() -> PatternMask {
        PatternMask::from_rows(&[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]]).unwrap()
    }

    #[test]
    fn test_empty_masks_rejected() {
        assert_eq!(
            PatternMask::from_rows(&[]),
            Err(Error::InvalidMask {
                height: 0,
                width: 0
            })
        );
        assert_eq!(
            PatternMask::from_rows(&[&[], &[]]),
            Err(Error::InvalidMask {
                height: 2,
                width: 0
            })
        );
        assert!(PatternMask::from_cells(0, 3, vec![]).is_err());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert_eq!(
            PatternMask::from_rows(&[&[1, 1], &[1]]),
            Err(Error::DimensionMismatch {
                row: 1,
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_rotate90_counter_clockwise() {
        let mask = PatternMask::from_rows(&[&[1, 0, 0], &[1, 1, 0]]).unwrap();
        let rotated = mask.rotate90();
        assert_eq!(
            rotated,
            PatternMask::from_rows(&[&[0, 0], &[0, 1], &[1, 1]]).unwrap()
        );
        assert_eq!(rotated.rotate90().rotate90().rotate90(), mask);
    }

    #[test]
    fn test_flips_are_involutions() {
        let g = glider();
        assert_eq!(g.flip_horizontal().flip_horizontal(), g);
        assert_eq!(g.flip_vertical().flip_vertical(), g);
        assert_eq!(
            g.flip_horizontal(),
            PatternMask::from_rows(&[&[0, 1, 0], &[1, 0, 0], &[1, 1, 1]]).unwrap()
        );
        assert_eq!(
            g.flip_vertical(),
            PatternMask::from_rows(&[&[1, 1, 1], &[0, 0, 1], &[0, 1, 0]]).unwrap()
        );
    }

    #[test]
    fn test_variant_counts() {
        let block = PatternMask::from_rows(&[&[1, 1], &[1, 1]]).unwrap();
        assert_eq!(block.variants(), vec![block.clone()]);

        let blinker = PatternMask::from_rows(&[&[1, 1, 1]]).unwrap();
        let variants = blinker.variants();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[1].height(), 3);
        assert_eq!(variants[1].width(), 1);

        let g = glider();
        let variants = g.variants();
        assert_eq!(variants.len(), 8);
        assert_eq!(variants[0], g);
        let mut rotation = g.clone();
        for _ in 0..4 {
            assert!(variants.contains(&rotation));
            rotation = rotation.rotate90();
        }
    }

    #[test]
    fn test_variants_are_pairwise_distinct() {
        let loaf = PatternMask::from_rows(&[&[0, 1, 1, 0], &[1, 0, 0, 1], &[0, 1, 0, 1], &[0, 0, 1, 0]])
            .unwrap();
        let variants = loaf.variants();
        assert_eq!(variants.len(), 4);
        for (i, a) in variants.iter().enumerate() {
            for b in variants.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_rle_glider() {
        let parsed = PatternMask::from_rle(b"#C glider\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!").unwrap();
        assert_eq!(parsed, glider());
    }

    #[test]
    fn test_rle_trailing_dead_cells_are_kept() {
        let parsed = PatternMask::from_rle(b"x = 4, y = 3\n2o$2o!").unwrap();
        assert_eq!(
            parsed,
            PatternMask::from_rows(&[&[1, 1, 0, 0], &[1, 1, 0, 0], &[0, 0, 0, 0]]).unwrap()
        );
    }

    #[test]
    fn test_rle_errors() {
        assert!(matches!(
            PatternMask::from_rle(b""),
            Err(Error::InvalidRle(_))
        ));
        assert!(matches!(
            PatternMask::from_rle(b"x = 3, y = 3, rule = B36/S23\n3o!"),
            Err(Error::InvalidRle(_))
        ));
        assert!(matches!(
            PatternMask::from_rle(b"x = 2, y = 1\n3o!"),
            Err(Error::InvalidRle(_))
        ));
        assert!(matches!(
            PatternMask::from_rle(b"x = 2, y = 1\n2q!"),
            Err(Error::InvalidRle(_))
        ));
        assert!(matches!(
            PatternMask::from_rle(b"x = 0, y = 1\n!"),
            Err(Error::InvalidMask { .. })
        ));
    }

    #[test]
    fn test_rle_huge_numbers() {
        for rle in [
            &b"x = 3, y = 3\n99999999999999999999999o!"[..],
            b"x = 3, y = 3\nbo18446744073709551615b!",
            b"x = 3, y = 3\n$18446744073709551615$o!",
            b"x = 18446744073709551615, y = 2\no!",
            b"x = 100000, y = 100000\no!",
        ] {
            assert!(
                matches!(PatternMask::from_rle(rle), Err(Error::InvalidRle(_))),
                "Accepted {:?}",
                String::from_utf8_lossy(rle)
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(glider().to_string(), ".*.\n..*\n***\n");
    }
}
