//! Tests for constraint types

use super::constraint::*;
use super::variable::VariableId;

fn v(i: usize) -> VariableId {
    VariableId::new(i)
}

#[test]
fn test_comparison_display() {
    assert_eq!(Comparison::Eq.to_string(), "=");
    assert_eq!(Comparison::Le.to_string(), "<=");
    assert_eq!(Comparison::Ge.to_string(), ">=");
}

#[test]
fn test_comparison_bounds() {
    assert!(Comparison::Eq.has_upper_bound() && Comparison::Eq.has_lower_bound());
    assert!(Comparison::Le.has_upper_bound() && !Comparison::Le.has_lower_bound());
    assert!(!Comparison::Ge.has_upper_bound() && Comparison::Ge.has_lower_bound());
}

#[test]
fn test_linear_satisfaction_with_coefficients() {
    let mut set = ConstraintSet::new();
    set.add_linear(
        vec![Term::new(v(0), 2), Term::unit(v(1)), Term::new(v(2), 3)],
        Comparison::Le,
        3,
        3,
    )
    .unwrap();

    let (_, constraint) = set.iter().next().unwrap();
    assert!(constraint.is_satisfied_by(|var| var == v(0) || var == v(1)));
    assert!(!constraint.is_satisfied_by(|var| var == v(0) || var == v(2)));
}

#[test]
fn test_indicator_satisfaction() {
    let mut set = ConstraintSet::new();
    set.add_indicator(v(0), vec![v(1), v(2)], 3).unwrap();
    let constraint = set.get(ConstraintRef::new(0)).unwrap();

    assert!(constraint.is_satisfied_by(|_| true));
    assert!(constraint.is_satisfied_by(|_| false));
    assert!(constraint.is_satisfied_by(|var| var == v(1)));
    assert!(!constraint.is_satisfied_by(|var| var == v(0) || var == v(1)));
}

#[test]
fn test_constraint_variables() {
    let mut set = ConstraintSet::new();
    set.add_indicator(v(3), vec![v(1), v(2)], 4).unwrap();
    let vars: Vec<_> = set.get(ConstraintRef::new(0)).unwrap().variables().collect();
    assert_eq!(vars, vec![v(3), v(1), v(2)]);
}

#[test]
fn test_first_violated() {
    let mut set = ConstraintSet::new();
    set.add_linear(vec![Term::unit(v(0))], Comparison::Eq, 1, 2)
        .unwrap();
    set.add_linear(vec![Term::unit(v(1))], Comparison::Eq, 1, 2)
        .unwrap();

    assert_eq!(set.first_violated(|var| var == v(0)), Some(ConstraintRef::new(1)));
    assert_eq!(set.first_violated(|_| true), None);
}

#[test]
fn test_term_conversions() {
    assert_eq!(Term::from(v(2)), Term::unit(v(2)));
    assert_eq!(Term::from((v(2), 4)), Term::new(v(2), 4));
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_constraint_ref_past_u32_range() {
    let beyond = u32::MAX as usize + 7;
    assert_eq!(ConstraintRef::new(beyond).index(), beyond);
    assert_ne!(ConstraintRef::new(beyond), ConstraintRef::new(6));
}
