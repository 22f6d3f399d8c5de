use crate::{Error, PatternMask, Result};
use ahash::AHashMap as HashMap;
use tracing::debug;

/// A registered pattern: its name, the mask as authored and every distinct
/// orientation of that mask.
#[derive(Clone, Debug)]
pub struct PatternDefinition {
    name: String,
    canonical: PatternMask,
    variants: Vec<PatternMask>,
}

impl PatternDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The mask as it was registered, before any symmetry transform.
    pub fn canonical(&self) -> &PatternMask {
        &self.canonical
    }

    /// Distinct orientations, canonical first. Holds 1 to 8 masks.
    pub fn variants(&self) -> &[PatternMask] {
        &self.variants
    }
}

/// Named patterns together with their precomputed symmetry variants.
///
/// Names are unique and keep their registration order, which is also the
/// order used by [`crate::Census`] and [`crate::GenerationHistory`].
/// Variants are computed once on registration; the library is meant to be
/// built up front and then shared read-only.
#[derive(Clone, Debug, Default)]
pub struct PatternLibrary {
    entries: Vec<PatternDefinition>,
    index: HashMap<String, usize>,
}

impl PatternLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The classic still lifes, oscillators, spaceships and methuselahs.
    pub fn standard() -> Self {
        let mut library = Self::new();
        for (name, rows) in STANDARD_PATTERNS {
            // the table is static and every entry is a valid, uniquely named mask
            let mask = PatternMask::from_rows(rows).expect("A bug in the standard pattern table");
            library
                .register(name, mask)
                .expect("A bug in the standard pattern table");
        }
        library
    }

    /// Adds a named pattern and computes its symmetry variants.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateName`] if `name` is already registered
    /// - [`Error::InvalidMask`] if the mask has no cells
    pub fn register(&mut self, name: &str, canonical: PatternMask) -> Result<()> {
        if self.index.contains_key(name) {
            return Err(Error::DuplicateName(name.to_owned()));
        }
        // unreachable through the public mask constructors
        if canonical.height() == 0 || canonical.width() == 0 {
            return Err(Error::InvalidMask {
                height: canonical.height(),
                width: canonical.width(),
            });
        }
        let variants = canonical.variants();
        debug!(pattern = name, variants = variants.len(), "registered pattern");
        self.index.insert(name.to_owned(), self.entries.len());
        self.entries.push(PatternDefinition {
            name: name.to_owned(),
            canonical,
            variants,
        });
        Ok(())
    }

    /// Returns the definition registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPattern`] if `name` is not registered.
    pub fn get(&self, name: &str) -> Result<&PatternDefinition> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| Error::UnknownPattern(name.to_owned()))
    }

    /// Returns the distinct orientations of the pattern registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPattern`] if `name` is not registered.
    pub fn variants_of(&self, name: &str) -> Result<&[PatternMask]> {
        self.get(name).map(PatternDefinition::variants)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Registered definitions in registration order.
    pub fn entries(&self) -> &[PatternDefinition] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

type Rows = &'static [&'static [u8]];

#[rustfmt::skip]
const STANDARD_PATTERNS: [(&str, Rows); 16] = [
    ("Block", &[&[1, 1], &[1, 1]]),
    ("Beehive", &[&[0, 1, 1, 0], &[1, 0, 0, 1], &[0, 1, 1, 0]]),
    ("Loaf", &[&[0, 1, 1, 0], &[1, 0, 0, 1], &[0, 1, 0, 1], &[0, 0, 1, 0]]),
    ("Boat", &[&[1, 1, 0], &[1, 0, 1], &[0, 1, 0]]),
    ("Tub", &[&[0, 1, 0], &[1, 0, 1], &[0, 1, 0]]),
    ("Blinker", &[&[1, 1, 1]]),
    ("Toad", &[&[0, 1, 1, 1], &[1, 1, 1, 0]]),
    ("Beacon", &[&[1, 1, 0, 0], &[1, 1, 0, 0], &[0, 0, 1, 1], &[0, 0, 1, 1]]),
    ("Pulsar", &[
        &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
        &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
        &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
        &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
        &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
        &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
        &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    ]),
    ("Glider", &[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]]),
    ("LWSS", &[&[0, 1, 1, 1, 1], &[1, 0, 0, 0, 1], &[0, 0, 0, 0, 1], &[1, 0, 0, 1, 0]]),
    ("MWSS", &[
        &[0, 1, 1, 1, 1, 0],
        &[1, 0, 0, 0, 0, 1],
        &[0, 0, 0, 0, 0, 1],
        &[1, 0, 0, 0, 1, 0],
    ]),
    ("HWSS", &[
        &[0, 1, 1, 1, 1, 1],
        &[1, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 1],
        &[1, 0, 0, 0, 0, 1],
        &[0, 0, 0, 0, 1, 0],
    ]),
    ("Diehard", &[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 1, 0, 0, 0],
        &[1, 1, 0, 0, 0, 1, 1, 1],
        &[0, 0, 0, 0, 0, 0, 0, 0],
    ]),
    ("Acorn", &[&[0, 1, 0, 0, 0, 0, 0], &[0, 0, 0, 1, 0, 0, 0], &[1, 1, 0, 0, 1, 1, 1]]),
    ("Pentadecathlon", &[
        &[0, 1, 1, 0, 0, 1, 1, 0],
        &[1, 1, 1, 1, 1, 1, 1, 1],
        &[0, 1, 1, 0, 0, 1, 1, 0],
    ]),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> PatternMask {
        PatternMask::from_rows(&[&[1, 1], &[1, 1]]).unwrap()
    }

    #[test]
    fn test_duplicate_name() {
        let mut library = PatternLibrary::new();
        library.register("Block", block()).unwrap();
        assert_eq!(
            library.register("Block", block()),
            Err(Error::DuplicateName("Block".to_owned()))
        );
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_unknown_pattern() {
        let library = PatternLibrary::new();
        assert!(library.is_empty());
        assert_eq!(
            library.variants_of("Glider").unwrap_err(),
            Error::UnknownPattern("Glider".to_owned())
        );
    }

    #[test]
    fn test_names_keep_registration_order() {
        let mut library = PatternLibrary::new();
        for name in ["zeta", "alpha", "mu"] {
            library.register(name, block()).unwrap();
        }
        assert_eq!(library.names().collect::<Vec<_>>(), ["zeta", "alpha", "mu"]);
    }

    #[test]
    fn test_standard_variant_counts() {
        let library = PatternLibrary::standard();
        assert_eq!(library.len(), 16);
        let expected = [
            ("Block", 1),
            ("Tub", 1),
            ("Pulsar", 1),
            ("Blinker", 2),
            ("Beehive", 2),
            ("Beacon", 2),
            ("Pentadecathlon", 2),
            ("Loaf", 4),
            ("Boat", 4),
            ("Toad", 4),
            ("Glider", 8),
            ("LWSS", 8),
            ("Acorn", 8),
            ("Diehard", 8),
        ];
        for (name, count) in expected {
            assert_eq!(
                library.variants_of(name).unwrap().len(),
                count,
                "Unexpected variant count for {}",
                name
            );
        }
        for entry in library.entries() {
            let n = entry.variants().len();
            assert!((1..=8).contains(&n));
            assert_eq!(&entry.variants()[0], entry.canonical());
        }
    }

    #[test]
    fn test_variants_of_is_stable() {
        let library = PatternLibrary::standard();
        for name in library.names() {
            let first = library.variants_of(name).unwrap();
            let second = library.variants_of(name).unwrap();
            assert_eq!(first.len(), second.len());
            assert!(first.iter().all(|m| second.contains(m)));
        }
    }
}
