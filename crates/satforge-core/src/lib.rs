//! SatForge Core - Core types for boolean constraint satisfaction
//!
//! This crate provides the fundamental abstractions for SatForge:
//! - Variable store mapping opaque keys to boolean decision variables
//! - Linear (pseudo-boolean) and indicator constraints
//! - The model that owns both and guards them while a search runs
//! - Assignment views handed to solution consumers

pub mod assignment;
pub mod constraint;
pub mod error;
pub mod model;
pub mod variable;

#[cfg(test)]
mod constraint_tests;

pub use assignment::{Assignment, Solution, Value};
pub use constraint::{
    Comparison, Constraint, ConstraintRef, ConstraintSet, IndicatorConstraint, LinearConstraint,
    Term,
};
pub use error::{Result, SatForgeError};
pub use model::{Model, ModelGuard, SearchLease};
pub use variable::{VariableId, VariableStore};
