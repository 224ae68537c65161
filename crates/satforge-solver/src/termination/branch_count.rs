//! Branch count budget.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once the search has taken `limit` branches.
///
/// # Example
///
/// ```
/// use satforge_solver::termination::BranchCountTermination;
///
/// let term = BranchCountTermination::new(10_000);
/// ```
#[derive(Debug, Clone)]
pub struct BranchCountTermination {
    limit: u64,
}

impl BranchCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for BranchCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.branch_count() >= self.limit
    }
}
