//! End-to-end checks of soundness, completeness and ordering.

use std::collections::{BTreeSet, HashSet};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use satforge::prelude::*;
use satforge::termination::{BranchCountTermination, TimeTermination};
use satforge::MaybeTermination;
use satforge_test::{brute_force, nqueens_model, random_model, scenario_model};

fn run<T: MaybeTermination>(
    solver: &mut Solver<T>,
    selector: SolutionSelector,
) -> (Vec<Solution>, SearchResult) {
    let mut solutions = Vec::new();
    let result = solver
        .enumerate(
            |a: &Assignment<'_>| {
                solutions.push(a.to_solution());
                SolutionFlow::Continue
            },
            selector,
        )
        .unwrap();
    (solutions, result)
}

#[test]
fn every_delivered_solution_satisfies_the_model() {
    for seed in 0..30 {
        let model = random_model(seed, 10, 8);
        let (solutions, _) = run(&mut Solver::new(&model), SolutionSelector::All);
        for solution in &solutions {
            assert!(model.is_satisfied_by(&solution.values), "seed {}", seed);
        }
    }
}

#[test]
fn enumeration_matches_truth_table() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..25 {
        let variables = rng.random_range(1..=12);
        let constraints = rng.random_range(0..=10);
        let seed = rng.random();
        let model = random_model(seed, variables, constraints);

        let (solutions, result) = run(&mut Solver::new(&model), SolutionSelector::All);
        let values: Vec<Vec<bool>> = solutions.iter().map(|s| s.values.clone()).collect();

        assert_eq!(values, brute_force(&model), "seed {}", seed);
        assert!(result.is_exhausted());

        let distinct: HashSet<_> = values.iter().collect();
        assert_eq!(distinct.len(), values.len());
    }
}

#[test]
fn occurrence_indices_are_consecutive() {
    let model = nqueens_model(6);
    let (solutions, result) = run(&mut Solver::new(&model), SolutionSelector::All);

    let occurrences: Vec<u64> = solutions.iter().map(|s| s.occurrence).collect();
    assert_eq!(occurrences, (0..result.solutions_found).collect::<Vec<_>>());
}

#[test]
fn runs_are_deterministic() {
    let model = random_model(99, 14, 9);
    let (first, _) = run(&mut Solver::new(&model), SolutionSelector::All);
    let (second, _) = run(&mut Solver::new(&model), SolutionSelector::All);
    assert_eq!(first, second);
}

#[test]
fn rebuilt_model_reproduces_sequence() {
    let mut solver_a = Solver::new(&random_model(5, 12, 7));
    let (first, _) = run(&mut solver_a, SolutionSelector::All);
    solver_a.reset();
    let (again, _) = run(&mut solver_a, SolutionSelector::All);

    let mut solver_b = Solver::new(&random_model(5, 12, 7));
    let (rebuilt, _) = run(&mut solver_b, SolutionSelector::All);

    assert_eq!(first, again);
    assert_eq!(first, rebuilt);
}

#[test]
fn selector_delivers_exact_occurrences_and_halts() {
    let mut model = Model::new();
    let v: Vec<_> = (0..6).map(|i| model.new_variable(i).unwrap()).collect();
    model.add_sum(v, Comparison::Le, 3).unwrap();
    let (all, _) = run(&mut Solver::new(&model), SolutionSelector::All);

    let ids: BTreeSet<u64> = [2, 5, 9].into_iter().collect();
    let (picked, result) = run(&mut Solver::new(&model), SolutionSelector::Ids(ids));

    assert_eq!(picked, vec![all[2].clone(), all[5].clone(), all[9].clone()]);
    assert_eq!(result.solutions_found, 10);
    assert_eq!(result.solutions_delivered, 3);
    assert_eq!(result.status, SearchStatus::OccurrenceLimitReached);
}

#[test]
fn concrete_scenario() {
    let model = scenario_model();
    let (solutions, result) = satforge::solve_all(&model).unwrap();

    let a = model.lookup("a").unwrap();
    let b = model.lookup("b").unwrap();
    let c = model.lookup("c").unwrap();
    let r = model.lookup("r").unwrap();

    assert_eq!(solutions.len(), 2);
    let first = &solutions[0];
    assert!(first.value(a) && !first.value(b) && first.value(c) && !first.value(r));
    let second = &solutions[1];
    assert!(!second.value(a) && second.value(b) && second.value(c) && !second.value(r));

    assert_eq!(result.solutions_delivered, 2);
    assert!(result.completed());
}

#[test]
fn counters_zero_conflicts_without_backtracking_pressure() {
    let mut model = Model::new();
    for i in 0..5 {
        model.new_variable(i).unwrap();
    }
    let (_, result) = run(&mut Solver::new(&model), SolutionSelector::All);
    assert_eq!(result.conflicts, 0);
    assert_eq!(result.solutions_found, 32);
}

#[test]
fn budget_marks_result_incomplete() {
    let model = nqueens_model(8);
    let mut solver = Solver::new(&model).with_termination(BranchCountTermination::new(50));
    let (_, result) = run(&mut solver, SolutionSelector::All);

    assert!(!result.completed());
    assert!(!result.is_exhausted());
    assert_eq!(result.branches, 50);
}

#[test]
fn generous_time_budget_completes() {
    let model = nqueens_model(5);
    let mut solver = Solver::new(&model).with_termination(TimeTermination::seconds(60));
    let (solutions, result) = run(&mut solver, SolutionSelector::All);

    assert_eq!(solutions.len(), 10);
    assert!(result.completed());
}

#[test]
fn consumer_cannot_edit_model_mid_search() {
    let mut model = Model::new();
    let a = model.new_variable("a").unwrap();
    let b = model.new_variable("b").unwrap();
    model.add_sum([a, b], Comparison::Ge, 1).unwrap();

    let mut solver = Solver::new(&model);
    let mut rejected = 0;
    solver
        .enumerate(
            |_: &Assignment<'_>| {
                if model.new_variable("late") == Err(SatForgeError::ConcurrentModification) {
                    rejected += 1;
                }
                SolutionFlow::Continue
            },
            SolutionSelector::All,
        )
        .unwrap();

    assert_eq!(rejected, 3);
    assert!(model.lookup("late").is_err());
    assert_eq!(model.new_variable("late").unwrap(), VariableId::new(2));

    let err = solver.enumerate(|_: &Assignment<'_>| SolutionFlow::Continue, SolutionSelector::All);
    assert_eq!(err.unwrap_err(), SatForgeError::ConcurrentModification);
}

#[test]
fn unknown_key_and_invalid_constraints_fail_eagerly() {
    let mut model = Model::new();
    let a = model.new_variable("a").unwrap();

    assert!(matches!(model.lookup("missing"), Err(SatForgeError::UnknownKey(_))));
    assert!(matches!(
        model.add_indicator(a, [a]),
        Err(SatForgeError::InvalidConstraint(_))
    ));
    assert!(matches!(
        model.add_sum(Vec::new(), Comparison::Eq, 0),
        Err(SatForgeError::InvalidConstraint(_))
    ));
}
