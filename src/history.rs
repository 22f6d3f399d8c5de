use crate::{Census, Error, Result};

/// Per-pattern sequence of generation counts.
///
/// Each completed generation appends one value per pattern. Values are the
/// counts found in that generation; running totals are derived on demand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationHistory {
    series: Vec<(String, Vec<usize>)>,
}

impl GenerationHistory {
    /// Creates an empty history tracking `names` in the given order.
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            series: names
                .into_iter()
                .map(|name| (name.to_owned(), Vec::new()))
                .collect(),
        }
    }

    /// Appends one generation.
    ///
    /// Patterns missing from `census` get a zero so that every series keeps
    /// the same length; census entries for untracked names are ignored.
    pub fn record(&mut self, census: &Census) {
        let aligned = census.len() == self.series.len()
            && census.iter().zip(&self.series).all(|((a, _), (b, _))| a == b);
        if aligned {
            for ((_, count), (_, values)) in census.iter().zip(self.series.iter_mut()) {
                values.push(count);
            }
            return;
        }
        for (name, values) in self.series.iter_mut() {
            values.push(census.get(name).unwrap_or(0));
        }
    }

    /// Number of recorded generations.
    pub fn generations(&self) -> usize {
        self.series.first().map_or(0, |(_, v)| v.len())
    }

    /// Tracked names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|(n, _)| n.as_str())
    }

    /// Per-generation counts for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPattern`] if `name` is not tracked.
    pub fn series(&self, name: &str) -> Result<&[usize]> {
        self.series
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
            .ok_or_else(|| Error::UnknownPattern(name.to_owned()))
    }

    /// `(name, counts)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.series.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Sum of all recorded counts for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPattern`] if `name` is not tracked.
    pub fn cumulative(&self, name: &str) -> Result<u64> {
        Ok(self.series(name)?.iter().map(|&c| c as u64).sum())
    }

    /// Running totals of every tracked pattern, in order.
    pub fn cumulative_all(&self) -> Vec<(&str, u64)> {
        self.iter()
            .map(|(name, values)| (name, values.iter().map(|&c| c as u64).sum()))
            .collect()
    }

    /// Writes the history as CSV: a `generation` column followed by one
    /// column per pattern, one line per recorded generation (starting at 1).
    pub fn write_csv<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        write!(out, "generation")?;
        for name in self.names() {
            write!(out, ",{name}")?;
        }
        writeln!(out)?;
        for g in 0..self.generations() {
            write!(out, "{}", g + 1)?;
            for (_, values) in self.series.iter() {
                write!(out, ",{}", values[g])?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
