//! Error types for the in-memory content repository.

use thiserror::Error;

/// Errors raised by the node type registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No node type with this name is registered.
    #[error("node type not found: {name}")]
    NodeTypeNotFound {
        /// The requested name.
        name: String,
    },

    /// A node type with this name is already registered.
    #[error("node type already registered: {name}")]
    NodeTypeAlreadyRegistered {
        /// The conflicting name.
        name: String,
    },

    /// The node type name is empty.
    #[error("node type name must not be empty")]
    EmptyNodeTypeName,
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
