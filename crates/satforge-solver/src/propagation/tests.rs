//! Tests for the propagator.

use super::*;
use satforge_core::{Comparison, Model, Term};

fn compile(model: &Model<&'static str>) -> (Propagator, Trail) {
    let propagator = Propagator::compile(model.constraints(), model.variable_count());
    let trail = Trail::new(model.variable_count());
    (propagator, trail)
}

fn vars(model: &mut Model<&'static str>, names: &[&'static str]) -> Vec<VariableId> {
    names
        .iter()
        .map(|&name| model.new_variable(name).unwrap())
        .collect()
}

fn decide(propagator: &mut Propagator, trail: &mut Trail, var: VariableId, value: bool) {
    trail.open_level(var, value, false);
    propagator.assign(trail, var, value);
}

#[test]
fn test_at_most_forces_remaining_false() {
    let mut model = Model::new();
    let v = vars(&mut model, &["a", "b", "c"]);
    model.add_sum(v.clone(), Comparison::Le, 1).unwrap();
    let (mut propagator, mut trail) = compile(&model);

    assert_eq!(propagator.propagate_all(&mut trail), Ok(0));
    decide(&mut propagator, &mut trail, v[0], true);

    assert_eq!(propagator.propagate(&mut trail), Ok(2));
    assert_eq!(trail.value(v[1]), Value::False);
    assert_eq!(trail.value(v[2]), Value::False);
}

#[test]
fn test_at_least_forces_last_open_true() {
    let mut model = Model::new();
    let v = vars(&mut model, &["a", "b", "c"]);
    model.add_sum(v.clone(), Comparison::Ge, 2).unwrap();
    let (mut propagator, mut trail) = compile(&model);

    propagator.propagate_all(&mut trail).unwrap();
    decide(&mut propagator, &mut trail, v[0], false);

    assert_eq!(propagator.propagate(&mut trail), Ok(2));
    assert_eq!(trail.value(v[1]), Value::True);
    assert_eq!(trail.value(v[2]), Value::True);
}

#[test]
fn test_equality_conflict_when_too_many_true() {
    let mut model = Model::new();
    let v = vars(&mut model, &["a", "b", "c"]);
    let cref = model.add_sum(v.clone(), Comparison::Eq, 1).unwrap();
    let (mut propagator, mut trail) = compile(&model);

    propagator.propagate_all(&mut trail).unwrap();
    trail.open_level(v[0], true, false);
    propagator.assign(&mut trail, v[0], true);
    propagator.assign(&mut trail, v[1], true);

    assert_eq!(
        propagator.propagate(&mut trail),
        Err(Conflict { constraint: cref })
    );
}

#[test]
fn test_root_zero_bound_forces_all_false() {
    let mut model = Model::new();
    let v = vars(&mut model, &["a", "b"]);
    model.add_sum(v.clone(), Comparison::Eq, 0).unwrap();
    let (mut propagator, mut trail) = compile(&model);

    assert_eq!(propagator.propagate_all(&mut trail), Ok(2));
    assert!(trail.is_complete());
    assert_eq!(trail.values(), &[Value::False, Value::False]);
}

#[test]
fn test_root_unreachable_bound_is_conflict() {
    let mut model = Model::new();
    let v = vars(&mut model, &["a", "b"]);
    model.add_sum(v, Comparison::Ge, 3).unwrap();
    let (mut propagator, mut trail) = compile(&model);

    assert!(propagator.propagate_all(&mut trail).is_err());
}

#[test]
fn test_weighted_terms_forced_by_slack() {
    let mut model = Model::new();
    let v = vars(&mut model, &["a", "b", "c"]);
    // 3a + 2b + c <= 3
    model
        .add_linear(
            [Term::new(v[0], 3), Term::new(v[1], 2), Term::unit(v[2])],
            Comparison::Le,
            3,
        )
        .unwrap();
    let (mut propagator, mut trail) = compile(&model);

    propagator.propagate_all(&mut trail).unwrap();
    decide(&mut propagator, &mut trail, v[1], true);
    propagator.propagate(&mut trail).unwrap();

    assert_eq!(trail.value(v[0]), Value::False);
    assert_eq!(trail.value(v[2]), Value::Unassigned);
}

#[test]
fn test_indicator_false_member_forces_result_false() {
    let mut model = Model::new();
    let v = vars(&mut model, &["r", "a", "b"]);
    model.add_indicator(v[0], [v[1], v[2]]).unwrap();
    let (mut propagator, mut trail) = compile(&model);

    propagator.propagate_all(&mut trail).unwrap();
    decide(&mut propagator, &mut trail, v[2], false);
    propagator.propagate(&mut trail).unwrap();

    assert_eq!(trail.value(v[0]), Value::False);
}

#[test]
fn test_indicator_all_members_true_forces_result_true() {
    let mut model = Model::new();
    let v = vars(&mut model, &["r", "a", "b"]);
    model.add_indicator(v[0], [v[1], v[2]]).unwrap();
    let (mut propagator, mut trail) = compile(&model);

    decide(&mut propagator, &mut trail, v[1], true);
    propagator.assign(&mut trail, v[2], true);
    propagator.propagate(&mut trail).unwrap();

    assert_eq!(trail.value(v[0]), Value::True);
}

#[test]
fn test_indicator_true_result_forces_members_true() {
    let mut model = Model::new();
    let v = vars(&mut model, &["r", "a", "b"]);
    model.add_indicator(v[0], [v[1], v[2]]).unwrap();
    let (mut propagator, mut trail) = compile(&model);

    decide(&mut propagator, &mut trail, v[0], true);
    assert_eq!(propagator.propagate(&mut trail), Ok(2));
    assert_eq!(trail.value(v[1]), Value::True);
    assert_eq!(trail.value(v[2]), Value::True);
}

#[test]
fn test_indicator_false_result_forces_last_member_false() {
    let mut model = Model::new();
    let v = vars(&mut model, &["r", "a", "b", "c"]);
    model.add_indicator(v[0], [v[1], v[2], v[3]]).unwrap();
    let (mut propagator, mut trail) = compile(&model);

    decide(&mut propagator, &mut trail, v[0], false);
    propagator.assign(&mut trail, v[1], true);
    propagator.propagate(&mut trail).unwrap();
    assert_eq!(trail.value(v[3]), Value::Unassigned);

    propagator.assign(&mut trail, v[2], true);
    propagator.propagate(&mut trail).unwrap();
    assert_eq!(trail.value(v[3]), Value::False);
}

#[test]
fn test_indicator_conflict() {
    let mut model = Model::new();
    let v = vars(&mut model, &["r", "a"]);
    let cref = model.add_indicator(v[0], [v[1]]).unwrap();
    let (mut propagator, mut trail) = compile(&model);

    trail.open_level(v[0], true, false);
    propagator.assign(&mut trail, v[0], true);
    propagator.assign(&mut trail, v[1], false);

    assert_eq!(
        propagator.propagate(&mut trail),
        Err(Conflict { constraint: cref })
    );
}

#[test]
fn test_backjump_restores_counters() {
    let mut model = Model::new();
    let v = vars(&mut model, &["a", "b", "c"]);
    model.add_sum(v.clone(), Comparison::Le, 1).unwrap();
    let (mut propagator, mut trail) = compile(&model);

    decide(&mut propagator, &mut trail, v[0], true);
    propagator.propagate(&mut trail).unwrap();
    propagator.backjump(&mut trail).unwrap();

    // After unwinding, choosing b must again force a and c.
    decide(&mut propagator, &mut trail, v[1], true);
    assert_eq!(propagator.propagate(&mut trail), Ok(2));
    assert_eq!(trail.value(v[0]), Value::False);
    assert_eq!(trail.value(v[2]), Value::False);
}

#[test]
fn test_scenario_propagation_chain() {
    // a + b + c = 2, r = AND(a, b), r = 0
    let mut model = Model::new();
    let v = vars(&mut model, &["a", "b", "c", "r"]);
    model.add_sum([v[0], v[1], v[2]], Comparison::Eq, 2).unwrap();
    model.add_indicator(v[3], [v[0], v[1]]).unwrap();
    model.add_sum([v[3]], Comparison::Eq, 0).unwrap();
    let (mut propagator, mut trail) = compile(&model);

    assert_eq!(propagator.propagate_all(&mut trail), Ok(1));
    assert_eq!(trail.value(v[3]), Value::False);

    decide(&mut propagator, &mut trail, v[0], true);
    propagator.propagate(&mut trail).unwrap();
    assert_eq!(trail.value(v[1]), Value::False);
    assert_eq!(trail.value(v[2]), Value::True);
    assert!(trail.is_complete());
}
