//! Cancellation from outside the search loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::Termination;
use crate::scope::SearchScope;

/// Stops the search once a shared flag is raised.
///
/// Unlike [`SolverHandle::terminate_early`](crate::SolverHandle::terminate_early),
/// the flag is not cleared when a new search starts: once cancelled, every
/// later search stops before its first branch until [`reset`](Self::reset).
///
/// ```
/// use satforge_solver::termination::ExternalTermination;
///
/// let cancel = ExternalTermination::default();
/// let remote = cancel.clone();
/// assert!(!cancel.is_cancelled());
///
/// remote.cancel();
/// assert!(cancel.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    /// Watches an existing flag.
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Termination for ExternalTermination {
    fn is_terminated(&self, _scope: &SearchScope) -> bool {
        self.is_cancelled()
    }
}
