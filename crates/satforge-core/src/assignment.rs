//! Variable values and the assignment views handed to solution consumers.

use crate::variable::VariableId;

/// State of a variable during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Value {
    True,
    False,
    #[default]
    Unassigned,
}

impl Value {
    #[inline]
    pub fn from_bool(value: bool) -> Self {
        if value {
            Value::True
        } else {
            Value::False
        }
    }

    /// Returns the boolean value, or `None` while unassigned.
    #[inline]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Value::True => Some(true),
            Value::False => Some(false),
            Value::Unassigned => None,
        }
    }

    #[inline]
    pub fn is_assigned(self) -> bool {
        self != Value::Unassigned
    }
}

/// A total assignment found by the search, borrowed for one consumer call.
///
/// The view is only valid while the consumer runs; call
/// [`Assignment::to_solution`] to keep a copy.
///
/// # Example
///
/// ```
/// use satforge_core::{Assignment, Value, VariableId};
///
/// let values = [Value::True, Value::False, Value::True];
/// let assignment = Assignment::new(4, &values);
///
/// assert_eq!(assignment.occurrence(), 4);
/// assert!(assignment.value(VariableId::new(0)));
/// assert!(!assignment.value(VariableId::new(1)));
/// assert_eq!(assignment.true_variables().count(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Assignment<'a> {
    occurrence: u64,
    values: &'a [Value],
}

impl<'a> Assignment<'a> {
    pub fn new(occurrence: u64, values: &'a [Value]) -> Self {
        Self { occurrence, values }
    }

    /// 0-based index of this solution in enumeration order.
    pub fn occurrence(&self) -> u64 {
        self.occurrence
    }

    /// Returns the value of `var`.
    ///
    /// # Panics
    ///
    /// Panics if `var` does not belong to the searched model.
    #[inline]
    pub fn value(&self, var: VariableId) -> bool {
        self.values[var.index()] == Value::True
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the variables set to true, in id order.
    pub fn true_variables(&self) -> impl Iterator<Item = VariableId> + 'a {
        let values = self.values;
        values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == Value::True)
            .map(|(i, _)| VariableId::new(i))
    }

    /// Copies the assignment into an owned [`Solution`].
    pub fn to_solution(&self) -> Solution {
        Solution {
            occurrence: self.occurrence,
            values: self.values.iter().map(|v| *v == Value::True).collect(),
        }
    }
}

/// Owned copy of a delivered assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub occurrence: u64,
    pub values: Vec<bool>,
}

impl Solution {
    #[inline]
    pub fn value(&self, var: VariableId) -> bool {
        self.values[var.index()]
    }

    pub fn true_variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(|(i, _)| VariableId::new(i))
    }
}
