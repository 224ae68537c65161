//! Entry points that hide solver and enumerator wiring.

use std::fmt::Debug;
use std::hash::Hash;

use satforge_config::SolverConfig;
use satforge_core::{Assignment, Model, SatForgeError, Solution};
use satforge_solver::{
    ChannelConsumer, EnumeratorBuilder, SearchResult, SolutionConsumer, SolutionFlow,
    SolutionSelector, Solver,
};
use tokio::sync::mpsc;

use crate::Error;

/// Configuration file read by [`enumerate`] when present.
pub const CONFIG_FILE: &str = "satforge.toml";

/// Collects every solution of `model`.
pub fn solve_all<K>(model: &Model<K>) -> Result<(Vec<Solution>, SearchResult), SatForgeError>
where
    K: Eq + Hash + Clone + Debug,
{
    let mut solutions = Vec::new();
    let result = Solver::new(model).enumerate(
        |assignment: &Assignment<'_>| {
            solutions.push(assignment.to_solution());
            SolutionFlow::Continue
        },
        SolutionSelector::All,
    )?;
    Ok((solutions, result))
}

/// Enumerates `model` with settings from [`CONFIG_FILE`], or defaults when
/// the file is missing or unreadable.
pub fn enumerate<K, C>(model: &Model<K>, consumer: C) -> Result<SearchResult, Error>
where
    K: Eq + Hash + Clone + Debug,
    C: SolutionConsumer,
{
    let config = SolverConfig::load(CONFIG_FILE).unwrap_or_default();
    enumerate_with_config(model, consumer, &config)
}

/// Enumerates `model` with the budget and selection from `config`.
pub fn enumerate_with_config<K, C>(
    model: &Model<K>,
    consumer: C,
    config: &SolverConfig,
) -> Result<SearchResult, Error>
where
    K: Eq + Hash + Clone + Debug,
    C: SolutionConsumer,
{
    #[cfg(feature = "console")]
    satforge_console::init();

    config.validate()?;
    let mut enumerator = EnumeratorBuilder::build(consumer, config)?;
    let mut solver = Solver::new(model).with_config(config);
    Ok(solver.search(&mut enumerator)?)
}

/// Streams the solutions chosen by `selector` into a channel.
///
/// The search runs on the calling thread, so the returned receiver already
/// holds every selected solution.
pub fn run_with_channel<K>(
    model: &Model<K>,
    selector: SolutionSelector,
) -> Result<(mpsc::UnboundedReceiver<Solution>, SearchResult), SatForgeError>
where
    K: Eq + Hash + Clone + Debug,
{
    let (sender, receiver) = mpsc::unbounded_channel();
    let result = Solver::new(model).enumerate(ChannelConsumer::new(sender), selector)?;
    tracing::debug!(
        event = "channel_closed",
        solutions_delivered = result.solutions_delivered,
    );
    Ok((receiver, result))
}
