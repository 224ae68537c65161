//! Error types for SatForge

use thiserror::Error;

/// Main error type for SatForge operations.
///
/// All variants are raised while a problem is being built or when a search
/// is started. Once a search runs, it no longer fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SatForgeError {
    /// A key was looked up that was never registered.
    #[error("Unknown variable key: {0}")]
    UnknownKey(String),

    /// A constraint was rejected when it was added.
    #[error("Invalid constraint: {0}")]
    InvalidConstraint(String),

    /// The model was changed while a search was using it.
    #[error("Model was modified while a search was in progress")]
    ConcurrentModification,
}

/// Result type alias for SatForge operations
pub type Result<T> = std::result::Result<T, SatForgeError>;
