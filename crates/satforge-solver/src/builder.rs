//! Wiring from configuration types to search components.

use satforge_config::{ConfigError, SolverConfig, TerminationConfig};

use crate::enumerator::{Enumerator, SolutionConsumer};
use crate::scope::SearchScope;
use crate::termination::{
    BranchCountTermination, ConflictCountTermination, Termination, TimeTermination,
};

/// Termination assembled from a [`TerminationConfig`].
///
/// Fires as soon as any configured limit is reached.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredTermination {
    time: Option<TimeTermination>,
    branches: Option<BranchCountTermination>,
    conflicts: Option<ConflictCountTermination>,
}

impl ConfiguredTermination {
    pub fn time(&self) -> Option<&TimeTermination> {
        self.time.as_ref()
    }
}

impl Termination for ConfiguredTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        self.time.as_ref().is_some_and(|t| t.is_terminated(scope))
            || self.branches.as_ref().is_some_and(|t| t.is_terminated(scope))
            || self.conflicts.as_ref().is_some_and(|t| t.is_terminated(scope))
    }
}

/// Builds terminations from configuration.
pub struct TerminationBuilder;

impl TerminationBuilder {
    /// Returns `None` when the configuration sets no limit.
    pub fn build(config: &TerminationConfig) -> Option<ConfiguredTermination> {
        if config.is_unbounded() {
            return None;
        }
        Some(ConfiguredTermination {
            time: config.time_limit().map(TimeTermination::new),
            branches: config.branch_count_limit.map(BranchCountTermination::new),
            conflicts: config.conflict_count_limit.map(ConflictCountTermination::new),
        })
    }
}

/// Builds enumerators from configuration.
pub struct EnumeratorBuilder;

impl EnumeratorBuilder {
    /// Uses the configured selection, falling back to delivering every
    /// solution. Random selections are seeded with `random_seed`.
    pub fn build<C: SolutionConsumer>(
        consumer: C,
        config: &SolverConfig,
    ) -> Result<Enumerator<C>, ConfigError> {
        match &config.enumeration {
            Some(enumeration) => Enumerator::from_config(consumer, enumeration, config.random_seed),
            None => Ok(Enumerator::new(consumer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use satforge_config::SelectionConfig;
    use satforge_core::Assignment;

    use super::*;
    use crate::enumerator::{SolutionFlow, SolutionSelector};

    fn keep_going(_: &Assignment<'_>) -> SolutionFlow {
        SolutionFlow::Continue
    }

    #[test]
    fn test_unbounded_config_builds_nothing() {
        assert!(TerminationBuilder::build(&TerminationConfig::default()).is_none());
    }

    #[test]
    fn test_time_limit_from_config() {
        let config = TerminationConfig {
            seconds_spent_limit: Some(2),
            millis_spent_limit: Some(500),
            ..TerminationConfig::default()
        };
        let termination = TerminationBuilder::build(&config).unwrap();
        assert_eq!(
            termination.time().map(TimeTermination::limit),
            Some(Duration::from_millis(2500))
        );
    }

    #[test]
    fn test_branch_limit_fires() {
        let config = TerminationConfig {
            branch_count_limit: Some(1),
            ..TerminationConfig::default()
        };
        let termination = TerminationBuilder::build(&config).unwrap();
        let mut scope = SearchScope::new();
        scope.start_search();

        assert!(!termination.is_terminated(&scope));
        scope.stats_mut().record_branch();
        assert!(termination.is_terminated(&scope));
    }

    #[test]
    fn test_enumerator_defaults_to_all() {
        let enumerator = EnumeratorBuilder::build(keep_going, &SolverConfig::default()).unwrap();
        assert_eq!(enumerator.selector(), &SolutionSelector::All);
        assert_eq!(enumerator.occurrence_limit(), None);
    }

    #[test]
    fn test_enumerator_random_selection_uses_seed() {
        let config = SolverConfig::new()
            .with_random_seed(11)
            .with_selection(SelectionConfig::Random { count: 2, from: 8 });
        let a = EnumeratorBuilder::build(keep_going, &config).unwrap();
        let b = EnumeratorBuilder::build(keep_going, &config).unwrap();
        assert_eq!(a.selector(), b.selector());
    }

    #[test]
    fn test_enumerator_rejects_invalid_selection() {
        let config =
            SolverConfig::new().with_selection(SelectionConfig::Random { count: 9, from: 8 });
        assert!(EnumeratorBuilder::build(keep_going, &config).is_err());
    }
}
