//! Search statistics.
//!
//! Plain counters updated by the search loop and read by terminations and
//! the final [`SearchResult`](crate::SearchResult).

use std::time::{Duration, Instant};

/// Counters for a single search run.
///
/// # Example
///
/// ```
/// use satforge_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_branch();
/// stats.record_branch();
/// stats.record_conflict();
///
/// assert_eq!(stats.branches, 2);
/// assert_eq!(stats.conflicts, 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    start_time: Option<Instant>,
    end_time: Option<Instant>,
    /// Branches taken, counting both the first and the flipped branch.
    pub branches: u64,
    /// Propagation failures.
    pub conflicts: u64,
    /// Assignments inferred by propagation.
    pub propagations: u64,
    /// Complete assignments reached, selected or not.
    pub solutions_found: u64,
    /// Solutions handed to the consumer.
    pub solutions_delivered: u64,
    /// Deepest decision level reached.
    pub max_depth: usize,
}

impl SearchStats {
    /// Clears every counter and marks the start of the search.
    pub fn start(&mut self) {
        *self = Self {
            start_time: Some(Instant::now()),
            ..Self::default()
        };
    }

    /// Freezes the wall time.
    pub fn stop(&mut self) {
        if self.start_time.is_some() && self.end_time.is_none() {
            self.end_time = Some(Instant::now());
        }
    }

    /// Wall time since [`start`](Self::start), frozen once stopped.
    pub fn elapsed(&self) -> Duration {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    pub fn record_branch(&mut self) {
        self.branches += 1;
    }

    pub fn record_conflict(&mut self) {
        self.conflicts += 1;
    }

    pub fn record_propagations(&mut self, count: u64) {
        self.propagations += count;
    }

    pub fn record_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }

    /// Records a solution; `delivered` when it went to the consumer.
    pub fn record_solution(&mut self, delivered: bool) {
        self.solutions_found += 1;
        if delivered {
            self.solutions_delivered += 1;
        }
    }

    pub fn branches_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.branches as f64 / secs
        } else {
            0.0
        }
    }
}
