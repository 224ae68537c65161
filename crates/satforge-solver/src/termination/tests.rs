use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::scope::SearchScope;

fn started_scope() -> SearchScope {
    let mut scope = SearchScope::new();
    scope.start_search();
    scope
}

#[test]
fn test_branch_count_termination() {
    let mut scope = started_scope();
    let term = BranchCountTermination::new(2);

    assert!(!term.is_terminated(&scope));
    scope.stats_mut().record_branch();
    assert!(!term.is_terminated(&scope));
    scope.stats_mut().record_branch();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_conflict_count_termination() {
    let mut scope = started_scope();
    let term = ConflictCountTermination::new(1);

    assert!(!term.is_terminated(&scope));
    scope.stats_mut().record_conflict();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_time_termination() {
    let scope = started_scope();
    assert!(TimeTermination::new(Duration::ZERO).is_terminated(&scope));
    assert!(!TimeTermination::seconds(3600).is_terminated(&scope));
}

#[test]
fn test_external_termination() {
    let scope = started_scope();
    let flag = Arc::new(AtomicBool::new(false));
    let term = ExternalTermination::new(flag.clone());

    assert!(!term.is_terminated(&scope));
    flag.store(true, Ordering::SeqCst);
    assert!(term.is_terminated(&scope));

    term.reset();
    assert!(!term.is_terminated(&scope));
    assert!(!flag.load(Ordering::SeqCst));
}

#[test]
fn test_external_termination_clones_share_flag() {
    let scope = started_scope();
    let term = ExternalTermination::default();
    term.clone().cancel();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_time_termination_remaining() {
    let scope = started_scope();
    assert_eq!(
        TimeTermination::new(Duration::ZERO).remaining(&scope),
        Duration::ZERO
    );
    assert!(TimeTermination::minutes(5).remaining(&scope) > Duration::from_secs(60));
}

#[test]
fn test_or_termination() {
    let mut scope = started_scope();
    let term = OrTermination::new((
        BranchCountTermination::new(5),
        ConflictCountTermination::new(1),
    ));

    assert!(!term.is_terminated(&scope));
    scope.stats_mut().record_conflict();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_and_termination() {
    let mut scope = started_scope();
    let term = AndTermination::new((
        BranchCountTermination::new(1),
        ConflictCountTermination::new(1),
    ));

    scope.stats_mut().record_branch();
    assert!(!term.is_terminated(&scope));
    scope.stats_mut().record_conflict();
    assert!(term.is_terminated(&scope));
}
