use crate::util::{build_library, format_count, local_time};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use gol_census::{
    BitwiseEngine, LifeEngine, NaiveEngine, Simulation, SimulationConfig,
    DEFAULT_ALIVE_PROBABILITY, DEFAULT_GENERATIONS, DEFAULT_GRID_SIZE,
};
use std::io::{BufWriter, Write};

#[derive(Args, Debug)]
pub(super) struct RunArgs {
    /// Side length of the toroidal grid
    #[arg(short, long, default_value_t = DEFAULT_GRID_SIZE)]
    size: usize,

    /// Number of generations to simulate
    #[arg(short, long, default_value_t = DEFAULT_GENERATIONS)]
    generations: u64,

    /// Probability of each cell being alive initially
    #[arg(long, default_value_t = DEFAULT_ALIVE_PROBABILITY)]
    probability: f64,

    /// Seed for the initial grid; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// The engine to use for the simulation, default is bitwise
    #[arg(short, long, value_enum, default_value_t = Engine::Bitwise)]
    engine: Engine,

    /// Extra pattern to count, as NAME=FILE with the file in RLE format; may be repeated
    #[arg(short, long)]
    pattern: Vec<String>,

    /// Path to a CSV file receiving the per-generation counts
    #[arg(short, long)]
    output: Option<String>,

    /// Print a progress line every `every` generations; 0 disables it
    #[arg(long, default_value_t = 10)]
    every: u64,

    /// Print the final grid
    #[arg(long)]
    show_grid: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Engine {
    /// Cell-by-cell neighbor sums
    Naive,
    /// 64 cells per word with a bit-sliced adder
    Bitwise,
}

pub(super) fn run_simulation(args: RunArgs) -> Result<()> {
    let config = SimulationConfig {
        size: args.size,
        generations: args.generations,
        alive_probability: args.probability,
        seed: args.seed,
    };
    let library = build_library(&args.pattern)?;
    let engine: Box<dyn LifeEngine> = match args.engine {
        Engine::Naive => Box::new(NaiveEngine),
        Engine::Bitwise => Box::new(BitwiseEngine),
    };
    println!(
        "Started at {} with {} engine, {} patterns",
        local_time(),
        engine.name(),
        library.len()
    );
    let sim = Simulation::new(engine, library);

    let timer = std::time::Instant::now();
    let mut state = sim
        .initialize_with(&config)
        .context("Failed to initialize the simulation")?;
    println!(
        "Initialized {}x{} grid with population {} in {:.3} secs",
        config.size,
        config.size,
        format_count(state.grid().population()),
        timer.elapsed().as_secs_f64()
    );

    let timer = std::time::Instant::now();
    for _ in 0..config.generations {
        state = sim.run_generation(state);
        if args.every != 0 && state.generation() % args.every == 0 {
            println!(
                "Generation {} out of {}: population {}, matches {}",
                state.generation(),
                config.generations,
                format_count(state.grid().population()),
                format_count(state.last_census().total())
            );
        }
    }
    println!(
        "Simulated {} generations in {:.3} secs",
        config.generations,
        timer.elapsed().as_secs_f64()
    );

    if args.show_grid {
        print!("{}", state.grid());
    }

    println!("Cumulative pattern counts:");
    let totals = state.history().cumulative_all();
    let width = totals.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, total) in totals {
        println!("{:<width$} {:>10}", name, format_count(total));
    }

    if let Some(path) = &args.output {
        let file =
            std::fs::File::create(path).with_context(|| format!("Failed to create {}", path))?;
        let mut out = BufWriter::new(file);
        state
            .history()
            .write_csv(&mut out)
            .and_then(|_| out.flush())
            .with_context(|| format!("Failed to write {}", path))?;
        println!("Saved history to {}", path);
    }
    Ok(())
}
