//! SatForge Solver Engine
//!
//! This crate provides the search side of SatForge:
//! - Incremental propagation of linear and indicator constraints
//! - Deterministic depth-first search with chronological backtracking
//! - Solution enumeration with occurrence selection and caps
//! - Termination budgets and search statistics
//! - Configuration wiring (builder module)

pub mod builder;
pub mod enumerator;
mod propagation;
pub mod result;
pub mod scope;
pub mod solver;
pub mod stats;
pub mod termination;
mod trail;

#[cfg(test)]
mod test_utils;

pub use builder::{ConfiguredTermination, EnumeratorBuilder, TerminationBuilder};
pub use enumerator::{
    ChannelConsumer, Enumerator, SolutionConsumer, SolutionFlow, SolutionSelector,
};
pub use propagation::Conflict;
pub use result::{SearchResult, SearchStatus};
pub use scope::SearchScope;
pub use solver::{MaybeTermination, NoTermination, Solver, SolverHandle};
pub use stats::SearchStats;
pub use termination::{
    AndTermination, BranchCountTermination, ConflictCountTermination, ExternalTermination,
    OrTermination, Termination, TimeTermination,
};
