//! Depth-first search over boolean assignments.

use std::fmt::{self, Debug};
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use satforge_config::SolverConfig;
use satforge_core::{Model, ModelGuard, Result, VariableId};
use tracing::{debug, info, trace};

use crate::builder::{ConfiguredTermination, TerminationBuilder};
use crate::enumerator::{Enumerator, SolutionConsumer, SolutionSelector};
use crate::propagation::Propagator;
use crate::result::{SearchResult, SearchStatus};
use crate::scope::SearchScope;
use crate::termination::Termination;
use crate::trail::{Level, Trail};

/// Search engine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchState {
    Searching,
    SolutionFound,
    Backtracking,
    Exhausted,
}

/// Enumerates the solutions of a [`Model`].
///
/// The solver compiles a snapshot of the model's constraints when it is
/// created. Variables are branched in id order with TRUE tried before
/// FALSE, so solutions always come out in the same order.
///
/// # Type Parameters
/// * `T` - Budget checked before every branch: [`NoTermination`], or
///   `Option<T>` for any [`Termination`] such as [`ConfiguredTermination`]
///
/// # Example
///
/// ```
/// use satforge_core::{Assignment, Comparison, Model};
/// use satforge_solver::{Solver, SolutionFlow, SolutionSelector};
///
/// let mut model = Model::new();
/// let a = model.new_variable("a").unwrap();
/// let b = model.new_variable("b").unwrap();
/// model.add_sum([a, b], Comparison::Eq, 1).unwrap();
///
/// let mut found = Vec::new();
/// let result = Solver::new(&model)
///     .enumerate(
///         |s: &Assignment<'_>| {
///             found.push(s.value(a));
///             SolutionFlow::Continue
///         },
///         SolutionSelector::All,
///     )
///     .unwrap();
///
/// assert!(result.completed());
/// assert_eq!(found, vec![true, false]);
/// ```
pub struct Solver<T = NoTermination> {
    propagator: Propagator,
    trail: Trail,
    guard: ModelGuard,
    revision: u64,
    termination: T,
    terminate_early_flag: Arc<AtomicBool>,
    solving: Arc<AtomicBool>,
    config: Option<SolverConfig>,
}

impl<T: Debug> Debug for Solver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("variables", &self.trail.values().len())
            .field("constraints", &self.propagator.constraint_count())
            .field("revision", &self.revision)
            .field("termination", &self.termination)
            .finish()
    }
}

impl Solver<NoTermination> {
    /// Compiles `model` with no budget.
    pub fn new<K>(model: &Model<K>) -> Self
    where
        K: Eq + Hash + Clone + Debug,
    {
        Solver {
            propagator: Propagator::compile(model.constraints(), model.variable_count()),
            trail: Trail::new(model.variable_count()),
            guard: model.guard().clone(),
            revision: model.guard().revision(),
            termination: NoTermination,
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
            solving: Arc::new(AtomicBool::new(false)),
            config: None,
        }
    }

    /// Sets the budget.
    pub fn with_termination<U>(self, termination: U) -> Solver<Option<U>> {
        Solver {
            propagator: self.propagator,
            trail: self.trail,
            guard: self.guard,
            revision: self.revision,
            termination: Some(termination),
            terminate_early_flag: self.terminate_early_flag,
            solving: self.solving,
            config: self.config,
        }
    }

    /// Takes the budget from `config.termination`.
    pub fn with_config(self, config: &SolverConfig) -> Solver<Option<ConfiguredTermination>> {
        let termination = config.termination.as_ref().and_then(TerminationBuilder::build);
        Solver {
            propagator: self.propagator,
            trail: self.trail,
            guard: self.guard,
            revision: self.revision,
            termination,
            terminate_early_flag: self.terminate_early_flag,
            solving: self.solving,
            config: Some(config.clone()),
        }
    }
}

impl<T> Solver<T> {
    /// Returns a handle that can stop a running search from another thread.
    pub fn handle(&self) -> SolverHandle {
        SolverHandle {
            terminate_early_flag: self.terminate_early_flag.clone(),
            solving: self.solving.clone(),
        }
    }

    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> Option<&SolverConfig> {
        self.config.as_ref()
    }

    pub fn variable_count(&self) -> usize {
        self.trail.values().len()
    }

    /// Clears every assignment and counter.
    ///
    /// [`search`](Self::search) resets before it starts, so repeated runs
    /// produce the same solution sequence.
    pub fn reset(&mut self) {
        self.trail.reset();
        self.propagator.reset();
    }
}

impl<T: MaybeTermination> Solver<T> {
    /// Delivers the solutions chosen by `selector` to `consumer`.
    ///
    /// The search stops after the last occurrence `selector` can match.
    pub fn enumerate<C>(&mut self, consumer: C, selector: SolutionSelector) -> Result<SearchResult>
    where
        C: SolutionConsumer,
    {
        let mut enumerator = Enumerator::new(consumer).with_selector(selector);
        self.search(&mut enumerator)
    }

    /// Runs the search, offering every solution to `enumerator`.
    ///
    /// # Errors
    ///
    /// Returns [`SatForgeError::ConcurrentModification`] if the model was
    /// edited after this solver was created.
    ///
    /// [`SatForgeError::ConcurrentModification`]: satforge_core::SatForgeError::ConcurrentModification
    pub fn search<C>(&mut self, enumerator: &mut Enumerator<C>) -> Result<SearchResult>
    where
        C: SolutionConsumer,
    {
        let _lease = self.guard.begin_search(self.revision)?;

        self.solving.store(true, Ordering::SeqCst);
        self.terminate_early_flag.store(false, Ordering::SeqCst);

        let mut scope = SearchScope::new();
        scope.set_terminate_early_flag(self.terminate_early_flag.clone());
        self.reset();
        enumerator.reset();

        info!(
            event = "search_start",
            variables = self.trail.values().len(),
            constraints = self.propagator.constraint_count(),
            occurrence_limit = ?enumerator.occurrence_limit(),
        );

        scope.start_search();
        let status = self.run(&mut scope, enumerator);
        scope.stats_mut().stop();
        self.solving.store(false, Ordering::SeqCst);

        let result = SearchResult::new(status, scope.stats());
        info!(
            event = "search_end",
            status = %result.status,
            completed = result.completed(),
            solutions_found = result.solutions_found,
            solutions_delivered = result.solutions_delivered,
            conflicts = result.conflicts,
            branches = result.branches,
            propagations = result.propagations,
            max_depth = result.max_depth,
            duration_ms = result.wall_time.as_millis() as u64,
        );
        Ok(result)
    }

    fn run<C>(&mut self, scope: &mut SearchScope, enumerator: &mut Enumerator<C>) -> SearchStatus
    where
        C: SolutionConsumer,
    {
        if enumerator.is_saturated() {
            return SearchStatus::OccurrenceLimitReached;
        }

        let mut state = match self.propagator.propagate_all(&mut self.trail) {
            Ok(inferred) => {
                scope.stats_mut().record_propagations(inferred);
                SearchState::Searching
            }
            Err(conflict) => {
                scope.stats_mut().record_conflict();
                trace!(event = "conflict", constraint = %conflict.constraint, depth = 0);
                SearchState::Exhausted
            }
        };

        loop {
            state = match state {
                SearchState::Searching => match self.trail.next_unassigned() {
                    None => SearchState::SolutionFound,
                    Some(var) => {
                        if self.should_terminate(scope) {
                            return SearchStatus::BudgetExceeded;
                        }
                        self.branch(scope, var, true, false)
                    }
                },
                SearchState::SolutionFound => {
                    let offer = enumerator.offer(self.trail.values());
                    scope.stats_mut().record_solution(offer.delivered);
                    debug!(
                        event = "solution_found",
                        occurrence = offer.occurrence,
                        delivered = offer.delivered,
                        depth = self.trail.decision_level(),
                    );
                    if let Some(status) = offer.halt {
                        return status;
                    }
                    SearchState::Backtracking
                }
                SearchState::Backtracking => match self.unwind() {
                    None => SearchState::Exhausted,
                    Some(level) => {
                        if self.should_terminate(scope) {
                            return SearchStatus::BudgetExceeded;
                        }
                        self.branch(scope, level.decision, !level.value, true)
                    }
                },
                SearchState::Exhausted => return SearchStatus::Exhausted,
            };
        }
    }

    /// Opens a decision level for `var = value` and propagates it.
    fn branch(
        &mut self,
        scope: &mut SearchScope,
        var: VariableId,
        value: bool,
        flipped: bool,
    ) -> SearchState {
        scope.stats_mut().record_branch();
        self.trail.open_level(var, value, flipped);
        scope.stats_mut().record_depth(self.trail.decision_level());
        self.propagator.assign(&mut self.trail, var, value);

        match self.propagator.propagate(&mut self.trail) {
            Ok(inferred) => {
                scope.stats_mut().record_propagations(inferred);
                SearchState::Searching
            }
            Err(conflict) => {
                scope.stats_mut().record_conflict();
                trace!(
                    event = "conflict",
                    constraint = %conflict.constraint,
                    variable = %var,
                    value,
                    depth = self.trail.decision_level(),
                );
                SearchState::Backtracking
            }
        }
    }

    /// Pops levels until one still has its FALSE branch untried.
    fn unwind(&mut self) -> Option<Level> {
        while let Some(level) = self.propagator.backjump(&mut self.trail) {
            if !level.flipped {
                trace!(
                    event = "backtrack",
                    variable = %level.decision,
                    depth = self.trail.decision_level(),
                );
                return Some(level);
            }
        }
        None
    }

    fn should_terminate(&self, scope: &SearchScope) -> bool {
        scope.is_terminate_early() || self.termination.should_terminate(scope)
    }
}

/// Cloneable control handle for a [`Solver`].
#[derive(Debug, Clone)]
pub struct SolverHandle {
    terminate_early_flag: Arc<AtomicBool>,
    solving: Arc<AtomicBool>,
}

impl SolverHandle {
    /// Requests that the running search stop at its next branch.
    ///
    /// Returns false if no search is running.
    pub fn terminate_early(&self) -> bool {
        if self.solving.load(Ordering::SeqCst) {
            self.terminate_early_flag.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }
}

/// Marker type indicating no budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

/// Budget slot of a [`Solver`]: `NoTermination` or `Option<T: Termination>`.
pub trait MaybeTermination: Send {
    fn should_terminate(&self, scope: &SearchScope) -> bool;
}

impl<T: Termination> MaybeTermination for Option<T> {
    fn should_terminate(&self, scope: &SearchScope) -> bool {
        match self {
            Some(t) => t.is_terminated(scope),
            None => false,
        }
    }
}

impl MaybeTermination for NoTermination {
    fn should_terminate(&self, _scope: &SearchScope) -> bool {
        false
    }
}

impl Termination for NoTermination {
    fn is_terminated(&self, _scope: &SearchScope) -> bool {
        false
    }
}
