//! The problem model: variables, constraints and the search guard.

use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::constraint::{Comparison, ConstraintRef, ConstraintSet, Term};
use crate::error::{Result, SatForgeError};
use crate::variable::{VariableId, VariableStore};

#[derive(Debug, Default)]
struct GuardState {
    active_searches: AtomicUsize,
    revision: AtomicU64,
}

/// Shared handle tracking whether searches are running over a model.
///
/// The model refuses edits while any search holds a [`SearchLease`], and
/// bumps its revision on every edit so a solver can tell that the model it
/// compiled has since changed.
#[derive(Debug, Clone, Default)]
pub struct ModelGuard {
    state: Arc<GuardState>,
}

impl ModelGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of edits applied to the model so far.
    pub fn revision(&self) -> u64 {
        self.state.revision.load(Ordering::SeqCst)
    }

    /// Returns true while at least one search holds a lease.
    pub fn is_searching(&self) -> bool {
        self.state.active_searches.load(Ordering::SeqCst) > 0
    }

    /// Marks a search as running until the lease is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SatForgeError::ConcurrentModification`] if the model has
    /// moved past `expected_revision`.
    pub fn begin_search(&self, expected_revision: u64) -> Result<SearchLease> {
        self.state.active_searches.fetch_add(1, Ordering::SeqCst);
        let lease = SearchLease {
            state: Arc::clone(&self.state),
        };
        if self.revision() != expected_revision {
            return Err(SatForgeError::ConcurrentModification);
        }
        Ok(lease)
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.is_searching() {
            Err(SatForgeError::ConcurrentModification)
        } else {
            Ok(())
        }
    }

    fn bump(&self) {
        self.state.revision.fetch_add(1, Ordering::SeqCst);
    }
}

/// RAII marker for a running search. Edits are rejected while it lives.
#[derive(Debug)]
pub struct SearchLease {
    state: Arc<GuardState>,
}

impl Drop for SearchLease {
    fn drop(&mut self) {
        self.state.active_searches.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A boolean constraint problem under construction.
///
/// `K` is the caller's key type; the engine never looks inside it.
///
/// # Example
///
/// ```
/// use satforge_core::{Comparison, Model};
///
/// let mut model = Model::new();
/// let a = model.new_variable("a").unwrap();
/// let b = model.new_variable("b").unwrap();
/// let r = model.new_variable("r").unwrap();
///
/// model.add_sum([a, b], Comparison::Ge, 1).unwrap();
/// model.add_indicator(r, [a, b]).unwrap();
///
/// assert_eq!(model.variable_count(), 3);
/// assert_eq!(model.constraint_count(), 2);
/// assert!(model.add_indicator(r, [r, a]).is_err());
/// ```
pub struct Model<K> {
    variables: VariableStore<K>,
    constraints: ConstraintSet,
    guard: ModelGuard,
}

impl<K> Debug for Model<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("variables", &self.variables.len())
            .field("constraints", &self.constraints.len())
            .field("revision", &self.guard.revision())
            .finish()
    }
}

impl<K: Eq + Hash + Clone + Debug> Default for Model<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone + Debug> Model<K> {
    pub fn new() -> Self {
        Self {
            variables: VariableStore::new(),
            constraints: ConstraintSet::new(),
            guard: ModelGuard::new(),
        }
    }

    /// Allocates a variable for `key`, or returns the one already registered.
    pub fn new_variable(&mut self, key: K) -> Result<VariableId> {
        self.guard.ensure_mutable()?;
        let before = self.variables.len();
        let id = self.variables.new_variable(key);
        if self.variables.len() != before {
            self.guard.bump();
        }
        Ok(id)
    }

    pub fn lookup<Q>(&self, key: &Q) -> Result<VariableId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.variables.lookup(key)
    }

    pub fn key(&self, id: VariableId) -> Option<&K> {
        self.variables.key(id)
    }

    /// Adds `sum(terms) op bound`.
    pub fn add_linear<I>(
        &mut self,
        terms: I,
        comparison: Comparison,
        bound: i64,
    ) -> Result<ConstraintRef>
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        self.guard.ensure_mutable()?;
        let terms = terms.into_iter().map(Into::into).collect();
        let cref =
            self.constraints
                .add_linear(terms, comparison, bound, self.variables.len())?;
        self.guard.bump();
        Ok(cref)
    }

    /// Adds `sum(vars) op bound` with unit coefficients.
    pub fn add_sum<I>(
        &mut self,
        vars: I,
        comparison: Comparison,
        bound: i64,
    ) -> Result<ConstraintRef>
    where
        I: IntoIterator<Item = VariableId>,
    {
        self.add_linear(vars.into_iter().map(Term::unit), comparison, bound)
    }

    /// Adds `result = AND(members)`.
    pub fn add_indicator<I>(&mut self, result: VariableId, members: I) -> Result<ConstraintRef>
    where
        I: IntoIterator<Item = VariableId>,
    {
        self.guard.ensure_mutable()?;
        let members = members.into_iter().collect();
        let cref = self
            .constraints
            .add_indicator(result, members, self.variables.len())?;
        self.guard.bump();
        Ok(cref)
    }

    pub fn variables(&self) -> &VariableStore<K> {
        &self.variables
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn guard(&self) -> &ModelGuard {
        &self.guard
    }

    /// Returns true if the total assignment `values` satisfies every constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        values.len() == self.variables.len()
            && self
                .constraints
                .first_violated(|v| values[v.index()])
                .is_none()
    }
}
