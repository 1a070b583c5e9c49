//! Error types for component host operations.

use thiserror::Error;

use crate::descriptor::ComponentTypeId;

/// Errors that can occur during component host operations.
#[derive(Debug, Error)]
pub enum HostError {
    /// No registered component type carries this identifier
    #[error("component type not found: {0}")]
    ComponentNotFound(ComponentTypeId),

    /// The identifier is registered but was excluded from the catalog
    #[error("type does not satisfy the component contract: {0}")]
    CapabilityMismatch(ComponentTypeId),

    /// A registration's static config is unusable
    #[error("invalid metadata for {type_id}: {reason}")]
    Metadata {
        /// Identifier of the offending registration
        type_id: ComponentTypeId,
        /// What the validation rejected
        reason: String,
    },

    /// A component's render hook failed
    #[error("component '{name}' failed to render: {source}")]
    Render {
        /// Display name of the failing component
        name: String,
        /// The underlying failure
        #[source]
        source: anyhow::Error,
    },

    /// Record set could not be encoded or decoded
    #[error("record serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for component host operations
pub type Result<T> = std::result::Result<T, HostError>;
