//! Error types for Harbor core operations

use thiserror::Error;

use crate::types::NodeType;

/// Result type alias for Harbor operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised by the node registry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Offered stake does not meet the role's admission minimum
    #[error("stake {offered} below the {node_type} minimum of {required}")]
    InsufficientStake {
        node_type: NodeType,
        required: f64,
        offered: f64,
    },
}
