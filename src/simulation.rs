use crate::{count_all, Census, GenerationHistory, Grid, LifeEngine, PatternLibrary, Result};
use tracing::debug;

pub const DEFAULT_GRID_SIZE: usize = 50;
pub const DEFAULT_GENERATIONS: u64 = 100;
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.3;

/// Parameters of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Side length of the grid.
    pub size: usize,
    /// How many generations a driver is expected to request.
    pub generations: u64,
    /// Chance of each cell being alive in the initial grid.
    pub alive_probability: f64,
    /// Seed for the initial grid; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            generations: DEFAULT_GENERATIONS,
            alive_probability: DEFAULT_ALIVE_PROBABILITY,
            seed: None,
        }
    }
}

/// Everything that changes from one generation to the next.
///
/// The state is a plain value: [`Simulation::run_generation`] consumes it
/// and returns its successor, so a state can be cloned to explore several
/// futures from the same generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationState {
    grid: Grid,
    history: GenerationHistory,
    generation: u64,
    last_census: Census,
}

impl SimulationState {
    /// Starts from `grid` with an empty history tracking the library's patterns.
    pub fn new(grid: Grid, library: &PatternLibrary) -> Self {
        Self {
            grid,
            history: GenerationHistory::new(library.names()),
            generation: 0,
            last_census: Census::default(),
        }
    }

    /// Current grid snapshot.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &GenerationHistory {
        &self.history
    }

    /// Number of completed generations.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Counts of the latest generation; empty before the first one.
    pub fn last_census(&self) -> &Census {
        &self.last_census
    }
}

/// Drives an engine and the pattern census one generation at a time.
///
/// The driver decides how many generations to request; there is no
/// internal timing or looping beyond [`Simulation::run`].
pub struct Simulation<E> {
    engine: E,
    library: PatternLibrary,
}

impl<E: LifeEngine> Simulation<E> {
    pub fn new(engine: E, library: PatternLibrary) -> Self {
        Self { engine, library }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Creates the initial state with a random grid.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidGridSize`] if `size` is zero
    /// - [`crate::Error::InvalidProbability`] if the probability is outside `[0, 1]`
    pub fn initialize(
        &self,
        size: usize,
        alive_probability: f64,
        seed: Option<u64>,
    ) -> Result<SimulationState> {
        let grid = Grid::random(size, alive_probability, seed)?;
        debug!(
            size,
            alive_probability,
            ?seed,
            population = grid.population(),
            "initialized grid"
        );
        Ok(SimulationState::new(grid, &self.library))
    }

    /// Same as [`Simulation::initialize`] with the values from `config`.
    pub fn initialize_with(&self, config: &SimulationConfig) -> Result<SimulationState> {
        self.initialize(config.size, config.alive_probability, config.seed)
    }

    /// Advances one generation: steps the grid, counts every pattern on the
    /// new grid and appends the counts to the history.
    pub fn run_generation(&self, state: SimulationState) -> SimulationState {
        let SimulationState {
            grid,
            mut history,
            generation,
            ..
        } = state;
        let grid = self.engine.step(&grid);
        let census = count_all(&grid, &self.library);
        history.record(&census);
        debug!(
            generation = generation + 1,
            population = grid.population(),
            matches = census.total(),
            "generation done"
        );
        SimulationState {
            grid,
            history,
            generation: generation + 1,
            last_census: census,
        }
    }

    /// Runs `generations` consecutive generations.
    pub fn run(&self, state: SimulationState, generations: u64) -> SimulationState {
        (0..generations).fold(state, |state, _| self.run_generation(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BitwiseEngine, Error, NaiveEngine};
    const SEED: u64 = 42;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.size, 50);
        assert_eq!(config.generations, 100);
        assert_eq!(config.alive_probability, 0.3);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_initialize_errors() {
        let sim = Simulation::new(NaiveEngine, PatternLibrary::standard());
        assert_eq!(
            sim.initialize(0, 0.3, Some(SEED)).unwrap_err(),
            Error::InvalidGridSize(0)
        );
        assert!(matches!(
            sim.initialize(10, 2.0, Some(SEED)),
            Err(Error::InvalidProbability(_))
        ));
    }

    #[test]
    fn test_history_length() {
        let sim = Simulation::new(BitwiseEngine, PatternLibrary::standard());
        let state = sim.initialize(20, 0.3, Some(SEED)).unwrap();
        assert_eq!(state.history().generations(), 0);
        assert!(state.last_census().is_empty());

        let state = sim.run(state, 7);
        assert_eq!(state.generation(), 7);
        for (name, values) in state.history().iter() {
            assert_eq!(values.len(), 7, "History of {} has wrong length", name);
            assert!(values.iter().all(|&v| v <= 20 * 20));
        }
        assert_eq!(state.last_census().len(), sim.library().len());
    }

    #[test]
    fn test_counts_use_stepped_grid() {
        let library = PatternLibrary::standard();
        let mut grid = Grid::new(10).unwrap();
        grid.place(library.get("Blinker").unwrap().canonical(), 5, 3);
        let sim = Simulation::new(NaiveEngine, library);
        let state = SimulationState::new(grid.clone(), sim.library());

        let state = sim.run_generation(state);
        assert_eq!(state.grid(), &NaiveEngine.step(&grid));
        assert_eq!(state.last_census().get("Blinker"), Some(1));
        assert_eq!(state.history().series("Blinker").unwrap(), &[1]);
    }

    #[test]
    fn test_branching_from_a_state() {
        let sim = Simulation::new(NaiveEngine, PatternLibrary::standard());
        let start = sim.initialize(16, 0.3, Some(SEED)).unwrap();
        let a = sim.run(start.clone(), 5);
        let b = sim.run(start, 5);
        assert_eq!(a, b);
    }
}
