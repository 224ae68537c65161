//! Propagation for `result = AND(members)`.

use satforge_core::{ConstraintRef, IndicatorConstraint, Value, VariableId};

use super::{Conflict, Forced};
use crate::trail::Trail;

#[derive(Debug, Clone)]
pub(super) struct IndicatorState {
    pub cref: ConstraintRef,
    result: VariableId,
    members: Vec<VariableId>,
    true_members: usize,
    false_members: usize,
}

impl IndicatorState {
    pub fn new(cref: ConstraintRef, constraint: &IndicatorConstraint) -> Self {
        Self {
            cref,
            result: constraint.result(),
            members: constraint.members().to_vec(),
            true_members: 0,
            false_members: 0,
        }
    }

    pub fn reset(&mut self) {
        self.true_members = 0;
        self.false_members = 0;
    }

    #[inline]
    pub fn on_member_assign(&mut self, value: bool) {
        if value {
            self.true_members += 1;
        } else {
            self.false_members += 1;
        }
    }

    #[inline]
    pub fn on_member_unassign(&mut self, value: bool) {
        if value {
            self.true_members -= 1;
        } else {
            self.false_members -= 1;
        }
    }

    pub fn examine(&self, trail: &Trail, forced: &mut Forced) -> Result<(), Conflict> {
        let conflict = Conflict {
            constraint: self.cref,
        };
        let result = trail.value(self.result);
        let size = self.members.len();

        if self.false_members > 0 {
            return match result {
                Value::True => Err(conflict),
                Value::Unassigned => {
                    forced.push((self.result, false));
                    Ok(())
                }
                Value::False => Ok(()),
            };
        }

        if self.true_members == size {
            return match result {
                Value::False => Err(conflict),
                Value::Unassigned => {
                    forced.push((self.result, true));
                    Ok(())
                }
                Value::True => Ok(()),
            };
        }

        match result {
            Value::True => {
                forced.extend(
                    self.open_members(trail)
                        .map(|member| (member, true)),
                );
            }
            // Exactly one member is open: it is the only one left to break the AND.
            Value::False if self.true_members + 1 == size => {
                forced.extend(
                    self.open_members(trail)
                        .map(|member| (member, false)),
                );
            }
            _ => {}
        }
        Ok(())
    }

    fn open_members<'a>(&'a self, trail: &'a Trail) -> impl Iterator<Item = VariableId> + 'a {
        self.members
            .iter()
            .copied()
            .filter(move |&m| trail.value(m) == Value::Unassigned)
    }
}
