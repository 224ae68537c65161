//! Search budgets.
//!
//! A termination is polled before every branching decision. When it fires,
//! the search stops and reports [`SearchStatus::BudgetExceeded`](crate::SearchStatus).

mod branch_count;
mod composite;
mod conflict_count;
mod external;
mod time;

use std::fmt::Debug;

use crate::scope::SearchScope;

pub use branch_count::BranchCountTermination;
pub use composite::{AndTermination, OrTermination};
pub use conflict_count::ConflictCountTermination;
pub use external::ExternalTermination;
pub use time::TimeTermination;

/// Decides when a running search has used up its budget.
pub trait Termination: Send + Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, scope: &SearchScope) -> bool;
}

#[cfg(test)]
mod tests;
