#![warn(clippy::all)]

mod counter;
mod engines;
mod error;
mod grid;
mod history;
mod library;
mod mask;
mod simulation;
mod traits;

pub use counter::{count, count_all, count_named, Census};
pub use engines::{BitwiseEngine, NaiveEngine};
pub use error::{Error, Result};
pub use grid::Grid;
pub use history::GenerationHistory;
pub use library::{PatternDefinition, PatternLibrary};
pub use mask::PatternMask;
pub use simulation::{
    Simulation, SimulationConfig, SimulationState, DEFAULT_ALIVE_PROBABILITY,
    DEFAULT_GENERATIONS, DEFAULT_GRID_SIZE,
};
pub use traits::LifeEngine;

pub type DefaultEngine = BitwiseEngine;

pub const VERSION: &str = "0.1.0";
