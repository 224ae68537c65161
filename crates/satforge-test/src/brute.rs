//! Exhaustive reference enumeration.

use std::fmt::Debug;
use std::hash::Hash;

use satforge_core::Model;

/// Largest model [`brute_force`] accepts.
pub const MAX_BRUTE_FORCE_VARIABLES: usize = 20;

/// Every satisfying assignment of `model`, in the order the solver
/// produces them: lexicographic over variable ids with TRUE before FALSE.
///
/// # Panics
///
/// Panics if the model has more than [`MAX_BRUTE_FORCE_VARIABLES`] variables.
pub fn brute_force<K>(model: &Model<K>) -> Vec<Vec<bool>>
where
    K: Eq + Hash + Clone + Debug,
{
    let n = model.variable_count();
    assert!(
        n <= MAX_BRUTE_FORCE_VARIABLES,
        "brute force over {} variables",
        n
    );

    let mut solutions = Vec::new();
    let mut values = vec![false; n];
    for mask in 0u32..(1u32 << n) {
        // Variable 0 is the most significant bit; a clear bit means TRUE.
        for (i, value) in values.iter_mut().enumerate() {
            *value = mask & (1 << (n - 1 - i)) == 0;
        }
        if model.is_satisfied_by(&values) {
            solutions.push(values.clone());
        }
    }
    solutions
}

/// Number of satisfying assignments of `model`.
pub fn count_solutions<K>(model: &Model<K>) -> usize
where
    K: Eq + Hash + Clone + Debug,
{
    brute_force(model).len()
}
