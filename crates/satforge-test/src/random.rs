//! Seeded random models.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use satforge_core::{Comparison, Model, Term, VariableId};

/// Builds a model over `variables` variables keyed `0..variables` with
/// `constraints` random linear or indicator constraints.
///
/// The same seed always yields the same model. Linear constraints use
/// coefficients in `1..=3` and a bound between 0 and the coefficient sum.
pub fn random_model(seed: u64, variables: usize, constraints: usize) -> Model<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut model = Model::new();
    let ids: Vec<VariableId> = (0..variables)
        .map(|key| model.new_variable(key).unwrap())
        .collect();
    if variables < 2 {
        return model;
    }

    for _ in 0..constraints {
        let mut pool = ids.clone();
        pool.shuffle(&mut rng);

        if rng.random_bool(0.3) {
            let size = rng.random_range(2..=variables.min(4));
            let result = pool[0];
            let members = pool[1..size].to_vec();
            model.add_indicator(result, members).unwrap();
        } else {
            let size = rng.random_range(1..=variables.min(5));
            let terms: Vec<Term> = pool[..size]
                .iter()
                .map(|&var| Term::new(var, rng.random_range(1..=3)))
                .collect();
            let total: i64 = terms.iter().map(|t| t.coefficient as i64).sum();
            let comparison = match rng.random_range(0..3) {
                0 => Comparison::Eq,
                1 => Comparison::Le,
                _ => Comparison::Ge,
            };
            let bound = rng.random_range(0..=total);
            model.add_linear(terms, comparison, bound).unwrap();
        }
    }
    model
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_model() {
        let a = random_model(3, 6, 4);
        let b = random_model(3, 6, 4);
        let constraints_a: Vec<_> = a.constraints().iter().map(|(_, c)| c.clone()).collect();
        let constraints_b: Vec<_> = b.constraints().iter().map(|(_, c)| c.clone()).collect();
        assert_eq!(constraints_a, constraints_b);
        assert_eq!(a.constraint_count(), 4);
    }
}
