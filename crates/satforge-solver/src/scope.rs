//! State shared between the search loop and its terminations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::stats::SearchStats;

/// Read-only view of a running search, passed to terminations.
#[derive(Debug, Default)]
pub struct SearchScope {
    stats: SearchStats,
    terminate_early_flag: Option<Arc<AtomicBool>>,
}

impl SearchScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_terminate_early_flag(&mut self, flag: Arc<AtomicBool>) {
        self.terminate_early_flag = Some(flag);
    }

    pub fn start_search(&mut self) {
        self.stats.start();
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    pub fn elapsed(&self) -> Duration {
        self.stats.elapsed()
    }

    pub fn branch_count(&self) -> u64 {
        self.stats.branches
    }

    pub fn conflict_count(&self) -> u64 {
        self.stats.conflicts
    }

    /// True once a caller has asked the running search to stop.
    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}
