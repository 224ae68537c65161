//! Bound propagation for `sum(coefficient * var) op bound`.

use satforge_core::{Comparison, ConstraintRef, LinearConstraint, Term, Value};

use super::{Conflict, Forced};
use crate::trail::Trail;

#[derive(Debug, Clone)]
pub(super) struct LinearState {
    pub cref: ConstraintRef,
    terms: Vec<Term>,
    comparison: Comparison,
    bound: i64,
    coefficient_sum: i64,
    max_coefficient: i64,
    /// Sum of coefficients of terms assigned true.
    true_sum: i64,
    /// Sum of coefficients of terms still unassigned.
    unassigned_sum: i64,
}

impl LinearState {
    pub fn new(cref: ConstraintRef, constraint: &LinearConstraint) -> Self {
        let coefficient_sum = constraint.coefficient_sum();
        let max_coefficient = constraint
            .terms()
            .iter()
            .map(|t| t.coefficient as i64)
            .max()
            .unwrap_or(0);
        Self {
            cref,
            terms: constraint.terms().to_vec(),
            comparison: constraint.comparison(),
            bound: constraint.bound(),
            coefficient_sum,
            max_coefficient,
            true_sum: 0,
            unassigned_sum: coefficient_sum,
        }
    }

    pub fn reset(&mut self) {
        self.true_sum = 0;
        self.unassigned_sum = self.coefficient_sum;
    }

    #[inline]
    pub fn on_assign(&mut self, coefficient: u32, value: bool) {
        self.unassigned_sum -= coefficient as i64;
        if value {
            self.true_sum += coefficient as i64;
        }
    }

    #[inline]
    pub fn on_unassign(&mut self, coefficient: u32, value: bool) {
        self.unassigned_sum += coefficient as i64;
        if value {
            self.true_sum -= coefficient as i64;
        }
    }

    /// Checks the bounds and collects terms whose value is forced.
    ///
    /// With `lo` the sum if every open term were false and `hi` the sum if
    /// every open term were true, an open term with coefficient `c` must be
    /// false when `lo + c` exceeds an upper bound, and true when `hi - c`
    /// falls below a lower bound.
    pub fn examine(&self, trail: &Trail, forced: &mut Forced) -> Result<(), Conflict> {
        let lo = self.true_sum;
        let hi = self.true_sum + self.unassigned_sum;

        let upper_slack = if self.comparison.has_upper_bound() {
            self.bound - lo
        } else {
            i64::MAX
        };
        let lower_slack = if self.comparison.has_lower_bound() {
            hi - self.bound
        } else {
            i64::MAX
        };

        if upper_slack < 0 || lower_slack < 0 {
            return Err(Conflict {
                constraint: self.cref,
            });
        }
        if self.unassigned_sum == 0 || self.max_coefficient <= upper_slack.min(lower_slack) {
            return Ok(());
        }

        for term in &self.terms {
            if trail.value(term.var) != Value::Unassigned {
                continue;
            }
            let coefficient = term.coefficient as i64;
            if coefficient > upper_slack {
                forced.push((term.var, false));
            } else if coefficient > lower_slack {
                forced.push((term.var, true));
            }
        }
        Ok(())
    }
}
