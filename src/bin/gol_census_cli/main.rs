mod patterns;
mod run;
mod util;

use clap::{Parser, Subcommand};
use patterns::{run_patterns, PatternsArgs};
use run::{run_simulation, RunArgs};

#[derive(Parser, Debug)]
#[command(version, about)]
struct CLIParser {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Run the simulation on a random torus and count known patterns every generation
    Run(RunArgs),
    /// List the pattern library with the number of distinct orientations of each pattern
    Patterns(PatternsArgs),
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = CLIParser::parse();

    match args.action {
        Action::Run(args) => run_simulation(args),
        Action::Patterns(args) => run_patterns(args),
    }
}
