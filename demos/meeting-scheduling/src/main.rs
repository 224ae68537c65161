//! Meeting Scheduling Example
//!
//! Twelve people meet in groups of five, once per weekday. Everyone attends
//! two or three meetings, and no group of five meets twice. This binary
//! enumerates schedules and prints the ones selected on the command line.

mod encoding;
mod render;
mod roster;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use satforge::{
    Assignment, Enumerator, SolutionFlow, SolutionSelector, Solver, SolverConfig, CONFIG_FILE,
};

use crate::encoding::encode;
use crate::roster::Roster;

#[derive(Parser, Debug)]
#[command(name = "meeting-scheduling")]
#[command(version)]
#[command(about = "Enumerate weekly meeting schedules")]
#[command(group(ArgGroup::new("selection").required(true).args(["rand", "num", "id"])))]
struct Args {
    /// Print N random solutions from the first M solutions
    #[arg(long, num_args = 2, value_names = ["N", "M"])]
    rand: Option<Vec<u64>>,

    /// Print the first N solutions
    #[arg(long, value_name = "N")]
    num: Option<u64>,

    /// Print the solutions with the given IDs
    #[arg(long, value_name = "ID", num_args = 1..)]
    id: Option<Vec<u64>>,

    /// Print a tab-separated table that can be pasted into a spreadsheet
    #[arg(long)]
    table: bool,

    /// Roster file (TOML); defaults to the built-in twelve-person week
    #[arg(long, value_name = "FILE")]
    roster: Option<PathBuf>,

    /// Solver configuration file (TOML or YAML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for --rand
    #[arg(long)]
    seed: Option<u64>,

    /// Show search progress on the console
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<SolverConfig, satforge::ConfigError> {
    match path {
        Some(path) => SolverConfig::load(path),
        None => Ok(SolverConfig::load(CONFIG_FILE).unwrap_or_default()),
    }
}

/// Returns the selector and whether the search should count every solution.
fn selection(
    args: &Args,
    config: &SolverConfig,
) -> Result<(SolutionSelector, bool), satforge::ConfigError> {
    if let Some(rand) = &args.rand {
        let seed = args.seed.or(config.random_seed);
        let selector = SolutionSelector::random_sample(rand[0], rand[1], seed)?;
        return Ok((selector, false));
    }
    if let Some(n) = args.num {
        // Print the first N but keep counting every solution.
        return Ok((SolutionSelector::First(n), true));
    }
    let ids = args.id.iter().flatten().copied().collect();
    Ok((SolutionSelector::Ids(ids), false))
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.verbose {
        satforge::console::init();
    }

    let roster = match &args.roster {
        Some(path) => Roster::load(path)?,
        None => Roster::default(),
    };
    let config = load_config(args.config.as_ref())?;
    let (selector, unbounded) = selection(&args, &config)?;

    let encoding = encode(&roster)?;
    tracing::info!(
        target: "satforge::encoding",
        event = "model_built",
        variables = encoding.model.variable_count(),
        constraints = encoding.model.constraint_count(),
        groups = encoding.group_count(),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut write_error = None;
    let mut enumerator = Enumerator::new(|assignment: &Assignment<'_>| {
        match render::write_solution(&mut out, &roster, &encoding, assignment, args.table) {
            Ok(()) => SolutionFlow::Continue,
            Err(err) => {
                write_error = Some(err);
                SolutionFlow::Stop
            }
        }
    })
    .with_selector(selector);
    if unbounded {
        enumerator = enumerator.unbounded();
    }

    let mut solver = Solver::new(&encoding.model).with_config(&config);
    let result = solver.search(&mut enumerator)?;
    drop(enumerator);

    if let Some(err) = write_error {
        return Err(err.into());
    }
    render::write_statistics(&mut out, &result)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
