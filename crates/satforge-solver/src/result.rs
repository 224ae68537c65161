//! Outcome of a search run.

use std::fmt;
use std::time::Duration;

use crate::stats::SearchStats;

/// Why a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Every assignment was explored.
    Exhausted,
    /// The occurrence limit was reached.
    OccurrenceLimitReached,
    /// The consumer returned [`SolutionFlow::Stop`](crate::SolutionFlow::Stop).
    StoppedByConsumer,
    /// A termination fired or early termination was requested.
    BudgetExceeded,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SearchStatus::Exhausted => "exhausted",
            SearchStatus::OccurrenceLimitReached => "occurrence limit reached",
            SearchStatus::StoppedByConsumer => "stopped by consumer",
            SearchStatus::BudgetExceeded => "budget exceeded",
        };
        f.write_str(text)
    }
}

/// Statistics and status of a finished search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub status: SearchStatus,
    pub solutions_found: u64,
    pub solutions_delivered: u64,
    pub conflicts: u64,
    pub branches: u64,
    pub propagations: u64,
    pub max_depth: usize,
    pub wall_time: Duration,
}

impl SearchResult {
    pub(crate) fn new(status: SearchStatus, stats: &SearchStats) -> Self {
        Self {
            status,
            solutions_found: stats.solutions_found,
            solutions_delivered: stats.solutions_delivered,
            conflicts: stats.conflicts,
            branches: stats.branches,
            propagations: stats.propagations,
            max_depth: stats.max_depth,
            wall_time: stats.elapsed(),
        }
    }

    /// False only when a budget cut the search short.
    ///
    /// Stopping at the occurrence limit or on consumer request still counts
    /// as completed: every requested solution was produced.
    pub fn completed(&self) -> bool {
        self.status != SearchStatus::BudgetExceeded
    }

    /// True when the whole search space was explored.
    pub fn is_exhausted(&self) -> bool {
        self.status == SearchStatus::Exhausted
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} solutions, {} conflicts, {} branches, {:.3}s)",
            self.status,
            self.solutions_found,
            self.conflicts,
            self.branches,
            self.wall_time.as_secs_f64()
        )
    }
}
