//! Solver configuration for SatForge.
//!
//! Search budgets, solution selection and the sampling seed can live in a
//! TOML or YAML file next to the program instead of in code.
//!
//! ```
//! use satforge_config::{SelectionConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!     branch_count_limit = 1000000
//!
//!     [enumeration.selection]
//!     type = "ids"
//!     ids = [2, 5, 9]
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(
//!     config.enumeration.unwrap().selection,
//!     SelectionConfig::Ids { ids: vec![2, 5, 9] }
//! );
//! ```
//!
//! A missing file is usually not fatal:
//!
//! ```
//! use satforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("satforge.toml").unwrap_or_default();
//! assert!(config.validate().is_ok());
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("malformed YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Everything a search can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Seed for random solution sampling. Unseeded samples differ per run.
    #[serde(default)]
    pub random_seed: Option<u64>,

    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Which solutions are delivered, and when enumeration stops.
    #[serde(default)]
    pub enumeration: Option<EnumerationConfig>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a configuration file, choosing the format by extension:
    /// `.yaml` and `.yml` are YAML, anything else is TOML.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file cannot be read, or a parse error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if is_yaml {
            Self::from_yaml_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::from)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_yaml_str(&std::fs::read_to_string(path)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(s).map_err(ConfigError::from)
    }

    fn termination_mut(&mut self) -> &mut TerminationConfig {
        self.termination.get_or_insert_with(TerminationConfig::default)
    }

    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination_mut().seconds_spent_limit = Some(seconds);
        self
    }

    pub fn with_branch_count_limit(mut self, limit: u64) -> Self {
        self.termination_mut().branch_count_limit = Some(limit);
        self
    }

    pub fn with_conflict_count_limit(mut self, limit: u64) -> Self {
        self.termination_mut().conflict_count_limit = Some(limit);
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Replaces the selection, keeping any configured limit.
    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.enumeration
            .get_or_insert_with(EnumerationConfig::default)
            .selection = selection;
        self
    }

    /// Total configured wall-clock budget.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination
            .as_ref()
            .and_then(TerminationConfig::time_limit)
    }

    /// Checks cross-field invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.enumeration {
            Some(enumeration) => enumeration.validate(),
            None => Ok(()),
        }
    }
}

/// Search budget. Every limit is optional; the first one reached stops
/// the search with an incomplete result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    pub seconds_spent_limit: Option<u64>,
    pub minutes_spent_limit: Option<u64>,
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of branching decisions, flips included.
    pub branch_count_limit: Option<u64>,

    pub conflict_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Sum of the three time units, or `None` when it is zero.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis: u64 = [
            self.millis_spent_limit,
            self.seconds_spent_limit.map(|s| s.saturating_mul(1_000)),
            self.minutes_spent_limit.map(|m| m.saturating_mul(60_000)),
        ]
        .into_iter()
        .flatten()
        .fold(0, u64::saturating_add);
        (millis > 0).then(|| Duration::from_millis(millis))
    }

    pub fn is_unbounded(&self) -> bool {
        self.time_limit().is_none()
            && self.branch_count_limit.is_none()
            && self.conflict_count_limit.is_none()
    }
}

/// Solution enumeration settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EnumerationConfig {
    pub selection: SelectionConfig,

    /// Stop once this many solutions were found. Overrides the limit
    /// implied by the selection.
    pub occurrence_limit: Option<u64>,

    /// Keep searching after the last selected solution so that every
    /// solution is counted.
    pub unbounded: bool,
}

impl EnumerationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.selection {
            SelectionConfig::Random { count, from } if count > from => {
                Err(ConfigError::Invalid(format!(
                    "cannot sample {} solutions from the first {}",
                    count, from
                )))
            }
            SelectionConfig::Ids { ids } if ids.is_empty() => Err(ConfigError::Invalid(
                "solution id selection is empty".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Which solution occurrence indices are handed to the consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionConfig {
    /// Every solution.
    #[default]
    All,

    /// The first `count` solutions.
    First { count: u64 },

    /// The solutions with the given occurrence indices.
    Ids { ids: Vec<u64> },

    /// `count` distinct solutions sampled from the first `from`.
    Random { count: u64, from: u64 },
}

#[cfg(test)]
mod tests;
