//! SatForge - Boolean constraint satisfaction in Rust
//!
//! Build a [`Model`] of boolean variables with linear and indicator
//! constraints, then enumerate its solutions in a fixed, reproducible order.
//!
//! # Example
//!
//! ```rust
//! use satforge::prelude::*;
//!
//! let mut model = Model::new();
//! let a = model.new_variable("a").unwrap();
//! let b = model.new_variable("b").unwrap();
//! let c = model.new_variable("c").unwrap();
//! let r = model.new_variable("r").unwrap();
//!
//! model.add_sum([a, b, c], Comparison::Eq, 2).unwrap();
//! model.add_indicator(r, [a, b]).unwrap();
//! model.add_sum([r], Comparison::Eq, 0).unwrap();
//!
//! let (solutions, result) = satforge::solve_all(&model).unwrap();
//! assert_eq!(solutions.len(), 2);
//! assert!(result.completed());
//! ```

pub use satforge_config::{
    ConfigError, EnumerationConfig, SelectionConfig, SolverConfig, TerminationConfig,
};
pub use satforge_core::{
    Assignment, Comparison, Constraint, ConstraintRef, IndicatorConstraint, LinearConstraint,
    Model, SatForgeError, Solution, Term, Value, VariableId,
};
pub use satforge_solver::termination;
pub use satforge_solver::{
    ChannelConsumer, Enumerator, MaybeTermination, NoTermination, SearchResult, SearchStatus,
    SolutionConsumer, SolutionFlow, SolutionSelector, Solver, SolverHandle,
};

#[cfg(feature = "console")]
pub use satforge_console as console;

mod error;
mod solver;

pub use error::Error;
pub use solver::{enumerate, enumerate_with_config, run_with_channel, solve_all, CONFIG_FILE};

pub mod prelude {
    pub use super::{
        Assignment, Comparison, Enumerator, Model, SatForgeError, SearchResult, SearchStatus,
        Solution, SolutionFlow, SolutionSelector, Solver, SolverConfig, Term, VariableId,
    };
}
