//! Wall-clock budget.

use std::time::Duration;

use super::Termination;
use crate::scope::SearchScope;

/// Stops the search once it has run for `limit`.
///
/// The clock starts when [`Solver::search`](crate::Solver::search) begins,
/// so a solver reused for several searches gets the full budget each time.
///
/// ```
/// use std::time::Duration;
/// use satforge_solver::termination::TimeTermination;
///
/// assert_eq!(TimeTermination::seconds(2).limit(), Duration::from_millis(2_000));
/// assert_eq!(TimeTermination::minutes(1).limit(), Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn minutes(mins: u64) -> Self {
        Self::new(Duration::from_secs(mins * 60))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Time left before the budget runs out.
    pub fn remaining(&self, scope: &SearchScope) -> Duration {
        self.limit.saturating_sub(scope.elapsed())
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        self.remaining(scope).is_zero()
    }
}
