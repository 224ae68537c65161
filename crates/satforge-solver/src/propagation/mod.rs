//! Incremental propagation over linear and indicator constraints.
//!
//! Each constraint keeps running counters (sum of true coefficients, sum of
//! unassigned coefficients, true/false member counts) that are updated as
//! variables are assigned and restored as the trail is unwound. After every
//! assignment only the constraints watching the touched variables are
//! re-examined, until a fixed point or a conflict is reached.

mod indicator;
mod linear;

use satforge_core::{Constraint, ConstraintRef, ConstraintSet, Value, VariableId};
use smallvec::SmallVec;

use crate::trail::Trail;

use indicator::IndicatorState;
use linear::LinearState;

/// A constraint that can no longer be satisfied by the current assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub constraint: ConstraintRef,
}

/// Forced assignments collected while a constraint is examined.
type Forced = SmallVec<[(VariableId, bool); 8]>;

#[derive(Debug, Clone, Copy)]
enum Watch {
    Linear { index: usize, coefficient: u32 },
    IndicatorResult { index: usize },
    IndicatorMember { index: usize },
}

/// Derives forced values and detects conflicts.
#[derive(Debug, Clone)]
pub(crate) struct Propagator {
    watches: Vec<Vec<Watch>>,
    linear: Vec<LinearState>,
    indicators: Vec<IndicatorState>,
}

impl Propagator {
    /// Builds watch lists and counters for `constraints`.
    pub fn compile(constraints: &ConstraintSet, variable_count: usize) -> Self {
        let mut watches = vec![Vec::new(); variable_count];
        let mut linear = Vec::with_capacity(constraints.linear_count());
        let mut indicators = Vec::with_capacity(constraints.indicator_count());

        for (cref, constraint) in constraints.iter() {
            match constraint {
                Constraint::Linear(c) => {
                    let index = linear.len();
                    for term in c.terms() {
                        watches[term.var.index()].push(Watch::Linear {
                            index,
                            coefficient: term.coefficient,
                        });
                    }
                    linear.push(LinearState::new(cref, c));
                }
                Constraint::Indicator(c) => {
                    let index = indicators.len();
                    watches[c.result().index()].push(Watch::IndicatorResult { index });
                    for member in c.members() {
                        watches[member.index()].push(Watch::IndicatorMember { index });
                    }
                    indicators.push(IndicatorState::new(cref, c));
                }
            }
        }

        Self {
            watches,
            linear,
            indicators,
        }
    }

    /// Restores every counter to the all-unassigned state.
    pub fn reset(&mut self) {
        self.linear.iter_mut().for_each(LinearState::reset);
        self.indicators.iter_mut().for_each(IndicatorState::reset);
    }

    pub fn constraint_count(&self) -> usize {
        self.linear.len() + self.indicators.len()
    }

    /// Assigns `var` on the trail and updates the counters watching it.
    pub fn assign(&mut self, trail: &mut Trail, var: VariableId, value: bool) {
        trail.push(var, value);
        for watch in &self.watches[var.index()] {
            match *watch {
                Watch::Linear { index, coefficient } => {
                    self.linear[index].on_assign(coefficient, value)
                }
                Watch::IndicatorMember { index } => {
                    self.indicators[index].on_member_assign(value)
                }
                Watch::IndicatorResult { .. } => {}
            }
        }
    }

    /// Reverts the counter updates made when `var` was assigned `value`.
    pub fn unassign(&mut self, var: VariableId, value: bool) {
        for watch in &self.watches[var.index()] {
            match *watch {
                Watch::Linear { index, coefficient } => {
                    self.linear[index].on_unassign(coefficient, value)
                }
                Watch::IndicatorMember { index } => {
                    self.indicators[index].on_member_unassign(value)
                }
                Watch::IndicatorResult { .. } => {}
            }
        }
    }

    /// Unwinds the deepest decision level, keeping counters in step.
    pub fn backjump(&mut self, trail: &mut Trail) -> Option<crate::trail::Level> {
        trail.pop_level(|var, value| self.unassign(var, value))
    }

    /// Examines every constraint once, then propagates to a fixed point.
    ///
    /// Used at the root, where constraints such as `sum <= 0` force values
    /// before any variable has been touched.
    pub fn propagate_all(&mut self, trail: &mut Trail) -> Result<u64, Conflict> {
        let mut inferred = 0;
        for index in 0..self.linear.len() {
            inferred += self.check_linear(index, trail)?;
        }
        for index in 0..self.indicators.len() {
            inferred += self.check_indicator(index, trail)?;
        }
        Ok(inferred + self.propagate(trail)?)
    }

    /// Propagates the consequences of every assignment not yet processed.
    ///
    /// Returns the number of inferred assignments.
    pub fn propagate(&mut self, trail: &mut Trail) -> Result<u64, Conflict> {
        let mut inferred = 0;
        while let Some(var) = trail.next_to_propagate() {
            for position in 0..self.watches[var.index()].len() {
                let watch = self.watches[var.index()][position];
                inferred += match watch {
                    Watch::Linear { index, .. } => self.check_linear(index, trail)?,
                    Watch::IndicatorResult { index } | Watch::IndicatorMember { index } => {
                        self.check_indicator(index, trail)?
                    }
                };
            }
        }
        Ok(inferred)
    }

    fn check_linear(&mut self, index: usize, trail: &mut Trail) -> Result<u64, Conflict> {
        let mut forced = Forced::new();
        self.linear[index].examine(trail, &mut forced)?;
        let cref = self.linear[index].cref;
        self.apply(trail, &forced, cref)
    }

    fn check_indicator(&mut self, index: usize, trail: &mut Trail) -> Result<u64, Conflict> {
        let mut forced = Forced::new();
        self.indicators[index].examine(trail, &mut forced)?;
        let cref = self.indicators[index].cref;
        self.apply(trail, &forced, cref)
    }

    fn apply(
        &mut self,
        trail: &mut Trail,
        forced: &Forced,
        cref: ConstraintRef,
    ) -> Result<u64, Conflict> {
        let mut inferred = 0;
        for &(var, value) in forced {
            match trail.value(var) {
                Value::Unassigned => {
                    self.assign(trail, var, value);
                    inferred += 1;
                }
                held if held == Value::from_bool(value) => {}
                _ => return Err(Conflict { constraint: cref }),
            }
        }
        Ok(inferred)
    }
}

#[cfg(test)]
mod tests;
