//! Hand-built models with known answers.

use satforge_core::{Comparison, Model};

/// Variables `a, b, c, r` with `a + b + c = 2`, `r = AND(a, b)`, `r = 0`.
///
/// Exactly two solutions, in order:
/// `a=T b=F c=T r=F` and `a=F b=T c=T r=F`.
pub fn scenario_model() -> Model<&'static str> {
    let mut model = Model::new();
    let a = model.new_variable("a").unwrap();
    let b = model.new_variable("b").unwrap();
    let c = model.new_variable("c").unwrap();
    let r = model.new_variable("r").unwrap();

    model.add_sum([a, b, c], Comparison::Eq, 2).unwrap();
    model.add_indicator(r, [a, b]).unwrap();
    model.add_sum([r], Comparison::Eq, 0).unwrap();
    model
}

/// `x1 = AND(x0)` and `x0 + x1 <= 1`.
///
/// Branching `x0 = TRUE` fails during propagation, so the search hits
/// exactly one conflict before finding its only solution (all false).
pub fn implication_model() -> Model<usize> {
    let mut model = Model::new();
    let x0 = model.new_variable(0).unwrap();
    let x1 = model.new_variable(1).unwrap();
    model.add_indicator(x1, [x0]).unwrap();
    model.add_sum([x0, x1], Comparison::Le, 1).unwrap();
    model
}
