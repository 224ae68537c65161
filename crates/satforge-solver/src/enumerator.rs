//! Solution delivery: occurrence selection, caps and consumers.
//!
//! Every complete assignment the search reaches gets the next occurrence
//! index. The [`SolutionSelector`] decides which indices reach the
//! consumer, and the occurrence limit tells the search when no later
//! solution can matter.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use satforge_config::{ConfigError, EnumerationConfig, SelectionConfig};
use satforge_core::{Assignment, Solution, Value};
use tokio::sync::mpsc::UnboundedSender;

use crate::result::SearchStatus;

/// What the consumer wants the search to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolutionFlow {
    #[default]
    Continue,
    Stop,
}

/// Receives the solutions chosen by the selector.
///
/// Implemented for any `FnMut(&Assignment<'_>) -> SolutionFlow`.
pub trait SolutionConsumer {
    fn accept(&mut self, assignment: &Assignment<'_>) -> SolutionFlow;
}

impl<F> SolutionConsumer for F
where
    F: FnMut(&Assignment<'_>) -> SolutionFlow,
{
    fn accept(&mut self, assignment: &Assignment<'_>) -> SolutionFlow {
        self(assignment)
    }
}

/// Streams owned solutions through an unbounded channel.
///
/// Sending never blocks the search. Once the receiver is dropped the
/// consumer asks the search to stop.
///
/// # Example
///
/// ```
/// use satforge_solver::ChannelConsumer;
///
/// let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
/// let consumer = ChannelConsumer::new(sender);
/// # drop(consumer);
/// # assert!(receiver.try_recv().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ChannelConsumer {
    sender: UnboundedSender<Solution>,
}

impl ChannelConsumer {
    pub fn new(sender: UnboundedSender<Solution>) -> Self {
        Self { sender }
    }
}

impl SolutionConsumer for ChannelConsumer {
    fn accept(&mut self, assignment: &Assignment<'_>) -> SolutionFlow {
        match self.sender.send(assignment.to_solution()) {
            Ok(()) => SolutionFlow::Continue,
            Err(_) => {
                tracing::debug!(
                    event = "receiver_dropped",
                    occurrence = assignment.occurrence(),
                );
                SolutionFlow::Stop
            }
        }
    }
}

/// Predicate over occurrence indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SolutionSelector {
    /// Every solution.
    #[default]
    All,
    /// Occurrences `0..n`.
    First(u64),
    /// Exactly the listed occurrences.
    Ids(BTreeSet<u64>),
}

impl SolutionSelector {
    /// Selects `count` distinct occurrences uniformly from `0..from`.
    ///
    /// With a seed the sample is reproducible; without one it is drawn from
    /// OS entropy.
    ///
    /// # Example
    ///
    /// ```
    /// use satforge_solver::SolutionSelector;
    ///
    /// let a = SolutionSelector::random_sample(3, 10, Some(7)).unwrap();
    /// let b = SolutionSelector::random_sample(3, 10, Some(7)).unwrap();
    /// assert_eq!(a, b);
    /// assert!(SolutionSelector::random_sample(11, 10, None).is_err());
    /// ```
    pub fn random_sample(count: u64, from: u64, seed: Option<u64>) -> Result<Self, ConfigError> {
        if count > from {
            return Err(ConfigError::Invalid(format!(
                "cannot sample {} solutions from the first {}",
                count, from
            )));
        }
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        let ids = rand::seq::index::sample(&mut rng, from as usize, count as usize)
            .into_iter()
            .map(|index| index as u64)
            .collect();
        Ok(SolutionSelector::Ids(ids))
    }

    /// Builds a selector from configuration, sampling random selections
    /// with `seed`.
    pub fn from_config(config: &SelectionConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        match config {
            SelectionConfig::All => Ok(SolutionSelector::All),
            SelectionConfig::First { count } => Ok(SolutionSelector::First(*count)),
            SelectionConfig::Ids { ids } => {
                Ok(SolutionSelector::Ids(ids.iter().copied().collect()))
            }
            SelectionConfig::Random { count, from } => Self::random_sample(*count, *from, seed),
        }
    }

    #[inline]
    pub fn selects(&self, occurrence: u64) -> bool {
        match self {
            SolutionSelector::All => true,
            SolutionSelector::First(n) => occurrence < *n,
            SolutionSelector::Ids(ids) => ids.contains(&occurrence),
        }
    }

    /// Occurrence count after which this selector can match nothing more.
    pub fn implied_limit(&self) -> Option<u64> {
        match self {
            SolutionSelector::All => None,
            SolutionSelector::First(n) => Some(*n),
            SolutionSelector::Ids(ids) => Some(ids.last().map_or(0, |max| max + 1)),
        }
    }
}

/// What happened to one offered solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Offer {
    pub occurrence: u64,
    pub delivered: bool,
    /// Set when the search must stop after this solution.
    pub halt: Option<SearchStatus>,
}

/// Numbers solutions, filters them and hands the chosen ones to a consumer.
///
/// # Example
///
/// ```
/// use satforge_core::Assignment;
/// use satforge_solver::{Enumerator, SolutionFlow, SolutionSelector};
///
/// let mut seen = Vec::new();
/// let enumerator = Enumerator::new(|a: &Assignment<'_>| {
///     seen.push(a.occurrence());
///     SolutionFlow::Continue
/// })
/// .with_selector(SolutionSelector::First(3));
///
/// assert_eq!(enumerator.occurrence_limit(), Some(3));
/// ```
#[derive(Debug)]
pub struct Enumerator<C> {
    consumer: C,
    selector: SolutionSelector,
    occurrence_limit: Option<u64>,
    next_occurrence: u64,
    delivered: u64,
}

impl<C: SolutionConsumer> Enumerator<C> {
    /// Delivers every solution with no occurrence cap.
    pub fn new(consumer: C) -> Self {
        Self {
            consumer,
            selector: SolutionSelector::All,
            occurrence_limit: None,
            next_occurrence: 0,
            delivered: 0,
        }
    }

    /// Builds an enumerator from configuration.
    ///
    /// The occurrence limit is, in order of precedence: none when
    /// `unbounded` is set, the explicit `occurrence_limit`, or the limit
    /// implied by the selection.
    pub fn from_config(
        consumer: C,
        config: &EnumerationConfig,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let selector = SolutionSelector::from_config(&config.selection, seed)?;
        let mut enumerator = Self::new(consumer).with_selector(selector);
        if config.unbounded {
            enumerator = enumerator.unbounded();
        } else if let Some(limit) = config.occurrence_limit {
            enumerator = enumerator.with_occurrence_limit(limit);
        }
        Ok(enumerator)
    }

    /// Sets the selector and the occurrence limit it implies.
    pub fn with_selector(mut self, selector: SolutionSelector) -> Self {
        self.occurrence_limit = selector.implied_limit();
        self.selector = selector;
        self
    }

    /// Stops the search once `limit` occurrences have been numbered.
    pub fn with_occurrence_limit(mut self, limit: u64) -> Self {
        self.occurrence_limit = Some(limit);
        self
    }

    /// Removes the occurrence limit so the search counts every solution.
    pub fn unbounded(mut self) -> Self {
        self.occurrence_limit = None;
        self
    }

    pub fn selector(&self) -> &SolutionSelector {
        &self.selector
    }

    pub fn occurrence_limit(&self) -> Option<u64> {
        self.occurrence_limit
    }

    /// Solutions numbered since the last reset.
    pub fn solutions_seen(&self) -> u64 {
        self.next_occurrence
    }

    pub fn solutions_delivered(&self) -> u64 {
        self.delivered
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    pub fn consumer_mut(&mut self) -> &mut C {
        &mut self.consumer
    }

    pub fn into_consumer(self) -> C {
        self.consumer
    }

    /// Restarts occurrence numbering.
    pub fn reset(&mut self) {
        self.next_occurrence = 0;
        self.delivered = 0;
    }

    /// True when the limit has been reached and no solution can be offered.
    pub fn is_saturated(&self) -> bool {
        self.occurrence_limit
            .is_some_and(|limit| self.next_occurrence >= limit)
    }

    /// Numbers a complete assignment and delivers it if selected.
    pub(crate) fn offer(&mut self, values: &[Value]) -> Offer {
        let occurrence = self.next_occurrence;
        self.next_occurrence += 1;

        let delivered = self.selector.selects(occurrence);
        let mut halt = None;
        if delivered {
            self.delivered += 1;
            let assignment = Assignment::new(occurrence, values);
            if self.consumer.accept(&assignment) == SolutionFlow::Stop {
                halt = Some(SearchStatus::StoppedByConsumer);
            }
        }
        if halt.is_none() && self.is_saturated() {
            halt = Some(SearchStatus::OccurrenceLimitReached);
        }

        Offer {
            occurrence,
            delivered,
            halt,
        }
    }
}
