use thiserror::Error;

/// Errors reported while building a library or initializing a simulation.
///
/// Once a grid and a library exist, stepping and counting cannot fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A mask with zero rows or zero columns was supplied.
    #[error("invalid mask: {height}x{width} has no cells")]
    InvalidMask { height: usize, width: usize },

    /// A pattern with this name is already registered.
    #[error("pattern {0:?} is already registered")]
    DuplicateName(String),

    /// No pattern with this name is registered.
    #[error("unknown pattern {0:?}")]
    UnknownPattern(String),

    /// The grid side must be at least 1.
    #[error("invalid grid size {0}")]
    InvalidGridSize(usize),

    /// Alive probability must lie in `[0, 1]`.
    #[error("alive probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// Rows handed to a constructor do not form the expected rectangle.
    #[error("dimension mismatch: expected {expected} cells in row {row}, got {got}")]
    DimensionMismatch { row: usize, expected: usize, got: usize },

    /// Malformed RLE input.
    #[error("invalid RLE: {0}")]
    InvalidRle(String),
}

pub type Result<T> = std::result::Result<T, Error>;
