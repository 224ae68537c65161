//! Shared test fixtures for SatForge crates.
//!
//! This crate provides small models and reference functions for testing.
//! It does NOT depend on `satforge-solver` so the solver can use it as a
//! dev-dependency.
//!
//! - [`brute`] - Truth-table enumeration in search order
//! - [`scenario`] - Hand-built models with known solution sets
//! - [`random`] - Seeded random models for cross-checking
//! - [`nqueens`] - N-Queens as a boolean model
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! satforge-test = { workspace = true }
//! ```

pub mod brute;
pub mod nqueens;
pub mod random;
pub mod scenario;

pub use brute::{brute_force, count_solutions};
pub use nqueens::{nqueens_model, NQUEENS_SOLUTION_COUNTS};
pub use random::random_model;
pub use scenario::{implication_model, scenario_model};
