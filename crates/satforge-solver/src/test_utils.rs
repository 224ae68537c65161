//! Helpers shared by the solver's unit tests.

use satforge_core::{Assignment, Result, Solution};

use crate::enumerator::{SolutionFlow, SolutionSelector};
use crate::result::SearchResult;
use crate::solver::{MaybeTermination, Solver};

/// Runs `solver` with `selector` and returns every delivered solution.
pub fn collect<T: MaybeTermination>(
    solver: &mut Solver<T>,
    selector: SolutionSelector,
) -> Result<(Vec<Solution>, SearchResult)> {
    let mut solutions = Vec::new();
    let result = solver.enumerate(
        |assignment: &Assignment<'_>| {
            solutions.push(assignment.to_solution());
            SolutionFlow::Continue
        },
        selector,
    )?;
    Ok((solutions, result))
}

/// Value vectors of `solutions`, dropping occurrence indices.
pub fn values(solutions: &[Solution]) -> Vec<Vec<bool>> {
    solutions.iter().map(|s| s.values.clone()).collect()
}
