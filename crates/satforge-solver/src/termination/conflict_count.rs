//! Conflict count budget.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once `limit` conflicts have been hit.
#[derive(Debug, Clone)]
pub struct ConflictCountTermination {
    limit: u64,
}

impl ConflictCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for ConflictCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.conflict_count() >= self.limit
    }
}
