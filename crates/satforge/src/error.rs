use satforge_config::ConfigError;
use satforge_core::SatForgeError;
use thiserror::Error;

/// Errors from the convenience entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] SatForgeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
