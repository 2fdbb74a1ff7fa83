//! Error types for simulation runs

use thiserror::Error;

use harbor_core::RegistryError;
use harbor_economics::ConfigError;

/// Errors raised while building or driving a simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Invalid economic configuration
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// Node admission rejected
    #[error("registration: {0}")]
    Registry(#[from] RegistryError),
}
