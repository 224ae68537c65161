//! Constraint types.
//!
//! Two constraint families cover everything the engine needs:
//! - [`LinearConstraint`]: `sum(coefficient * var) op bound` over boolean vars
//! - [`IndicatorConstraint`]: `result = AND(members)`

use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, SatForgeError};
use crate::variable::VariableId;

/// Reference to a constraint by insertion position.
///
/// # Example
///
/// ```
/// use satforge_core::ConstraintRef;
///
/// let cr = ConstraintRef::new(3);
/// assert_eq!(cr.index(), 3);
/// assert_eq!(cr.to_string(), "c3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintRef(usize);

impl ConstraintRef {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ConstraintRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Relational operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    /// `sum == bound`
    Eq,
    /// `sum <= bound`
    Le,
    /// `sum >= bound`
    Ge,
}

impl Comparison {
    /// Returns true if `lhs op rhs` holds.
    ///
    /// # Example
    ///
    /// ```
    /// use satforge_core::Comparison;
    ///
    /// assert!(Comparison::Le.holds(2, 3));
    /// assert!(!Comparison::Ge.holds(2, 3));
    /// assert!(Comparison::Eq.holds(3, 3));
    /// ```
    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Comparison::Eq => lhs == rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Ge => lhs >= rhs,
        }
    }

    /// True if the constraint caps the sum from above.
    pub fn has_upper_bound(self) -> bool {
        matches!(self, Comparison::Eq | Comparison::Le)
    }

    /// True if the constraint bounds the sum from below.
    pub fn has_lower_bound(self) -> bool {
        matches!(self, Comparison::Eq | Comparison::Ge)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Eq => write!(f, "="),
            Comparison::Le => write!(f, "<="),
            Comparison::Ge => write!(f, ">="),
        }
    }
}

/// One `coefficient * variable` term of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term {
    pub var: VariableId,
    pub coefficient: u32,
}

impl Term {
    pub fn new(var: VariableId, coefficient: u32) -> Self {
        Self { var, coefficient }
    }

    /// A term with coefficient 1.
    pub fn unit(var: VariableId) -> Self {
        Self::new(var, 1)
    }
}

impl From<VariableId> for Term {
    fn from(var: VariableId) -> Self {
        Term::unit(var)
    }
}

impl From<(VariableId, u32)> for Term {
    fn from((var, coefficient): (VariableId, u32)) -> Self {
        Term::new(var, coefficient)
    }
}

/// `sum(coefficient * var) op bound` over boolean variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    terms: Vec<Term>,
    comparison: Comparison,
    bound: i64,
}

impl LinearConstraint {
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn bound(&self) -> i64 {
        self.bound
    }

    /// Sum of all coefficients, i.e. the largest value the left side can take.
    pub fn coefficient_sum(&self) -> i64 {
        self.terms.iter().map(|t| t.coefficient as i64).sum()
    }

    pub fn is_satisfied_by(&self, value: impl Fn(VariableId) -> bool) -> bool {
        let lhs: i64 = self
            .terms
            .iter()
            .filter(|t| value(t.var))
            .map(|t| t.coefficient as i64)
            .sum();
        self.comparison.holds(lhs, self.bound)
    }
}

/// `result = AND(members)`, equivalently `result = min(members)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorConstraint {
    result: VariableId,
    members: Vec<VariableId>,
}

impl IndicatorConstraint {
    pub fn result(&self) -> VariableId {
        self.result
    }

    pub fn members(&self) -> &[VariableId] {
        &self.members
    }

    pub fn is_satisfied_by(&self, value: impl Fn(VariableId) -> bool) -> bool {
        value(self.result) == self.members.iter().all(|&m| value(m))
    }
}

/// A constraint held by a [`ConstraintSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Linear(LinearConstraint),
    Indicator(IndicatorConstraint),
}

impl Constraint {
    pub fn is_satisfied_by(&self, value: impl Fn(VariableId) -> bool) -> bool {
        match self {
            Constraint::Linear(c) => c.is_satisfied_by(value),
            Constraint::Indicator(c) => c.is_satisfied_by(value),
        }
    }

    /// Iterates over every variable the constraint mentions.
    pub fn variables(&self) -> Box<dyn Iterator<Item = VariableId> + '_> {
        match self {
            Constraint::Linear(c) => Box::new(c.terms.iter().map(|t| t.var)),
            Constraint::Indicator(c) => {
                Box::new(std::iter::once(c.result).chain(c.members.iter().copied()))
            }
        }
    }
}

/// Ordered, validated collection of constraints.
///
/// Constraints keep their insertion order; the propagator indexes them by
/// [`ConstraintRef`].
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
    linear_count: usize,
    indicator_count: usize,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends a linear constraint.
    ///
    /// `variable_count` is the number of variables allocated so far; every
    /// term must reference one of them.
    ///
    /// # Errors
    ///
    /// Returns [`SatForgeError::InvalidConstraint`] for an empty term list,
    /// an unknown variable, a variable listed twice, or a negative bound.
    pub fn add_linear(
        &mut self,
        terms: Vec<Term>,
        comparison: Comparison,
        bound: i64,
        variable_count: usize,
    ) -> Result<ConstraintRef> {
        if terms.is_empty() {
            return Err(invalid("linear constraint has no terms"));
        }
        if bound < 0 {
            return Err(invalid(format!(
                "linear constraint bound {} is negative",
                bound
            )));
        }
        let mut seen = HashSet::with_capacity(terms.len());
        for term in &terms {
            if term.var.index() >= variable_count {
                return Err(invalid(format!(
                    "linear constraint references unknown variable {}",
                    term.var
                )));
            }
            if !seen.insert(term.var) {
                return Err(invalid(format!(
                    "variable {} appears more than once in a linear constraint",
                    term.var
                )));
            }
        }

        self.linear_count += 1;
        Ok(self.push(Constraint::Linear(LinearConstraint {
            terms,
            comparison,
            bound,
        })))
    }

    /// Validates and appends an indicator constraint `result = AND(members)`.
    ///
    /// # Errors
    ///
    /// Returns [`SatForgeError::InvalidConstraint`] for an empty group, an
    /// unknown variable, a duplicated member, or when `result` is itself a
    /// member of the group.
    pub fn add_indicator(
        &mut self,
        result: VariableId,
        members: Vec<VariableId>,
        variable_count: usize,
    ) -> Result<ConstraintRef> {
        if members.is_empty() {
            return Err(invalid("indicator constraint has an empty group"));
        }
        if result.index() >= variable_count {
            return Err(invalid(format!(
                "indicator constraint references unknown variable {}",
                result
            )));
        }
        let mut seen = HashSet::with_capacity(members.len());
        for &member in &members {
            if member.index() >= variable_count {
                return Err(invalid(format!(
                    "indicator constraint references unknown variable {}",
                    member
                )));
            }
            if member == result {
                return Err(invalid(format!(
                    "indicator variable {} is a member of its own group",
                    result
                )));
            }
            if !seen.insert(member) {
                return Err(invalid(format!(
                    "variable {} appears more than once in an indicator group",
                    member
                )));
            }
        }

        self.indicator_count += 1;
        Ok(self.push(Constraint::Indicator(IndicatorConstraint { result, members })))
    }

    fn push(&mut self, constraint: Constraint) -> ConstraintRef {
        let cref = ConstraintRef::new(self.constraints.len());
        self.constraints.push(constraint);
        cref
    }

    pub fn get(&self, cref: ConstraintRef) -> Option<&Constraint> {
        self.constraints.get(cref.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConstraintRef, &Constraint)> {
        self.constraints
            .iter()
            .enumerate()
            .map(|(i, c)| (ConstraintRef::new(i), c))
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn linear_count(&self) -> usize {
        self.linear_count
    }

    pub fn indicator_count(&self) -> usize {
        self.indicator_count
    }

    /// Returns the first constraint violated by a total assignment, if any.
    pub fn first_violated(&self, value: impl Fn(VariableId) -> bool) -> Option<ConstraintRef> {
        self.iter()
            .find(|(_, c)| !c.is_satisfied_by(&value))
            .map(|(cref, _)| cref)
    }
}

fn invalid(message: impl Into<String>) -> SatForgeError {
    SatForgeError::InvalidConstraint(message.into())
}
