//! Error types for the search adaptor.
//!
//! Helper operations are permissive and mostly infallible. Errors come from
//! three places: a node type graph that cannot be flattened, the search
//! engine behind a [`SearchClient`](crate::driver::SearchClient), and
//! configuration.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all adaptor operations.
#[derive(Error, Debug)]
pub enum AdaptorError {
    /// Node type graph errors
    #[error(transparent)]
    NodeType(#[from] NodeTypeError),

    /// Search engine driver errors
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// Configuration errors
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Errors raised while walking a node type's supertype graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeTypeError {
    /// The supertype graph loops back onto a type that is still being visited.
    #[error("cyclic supertype declaration for node type {node_type}: {}", .cycle.join(" -> "))]
    CyclicSupertypes {
        node_type: String,
        /// The type names along the loop, starting and ending with the repeated name.
        cycle: Vec<String>,
    },
}

/// Errors raised by system drivers and search clients.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The request never produced a response.
    #[error("transport error for {method} {path}: {message}")]
    Transport {
        method: String,
        path: String,
        message: String,
    },

    /// The engine answered with a non-success status.
    #[error("unexpected status {status} for {method} {path}: {body}")]
    UnexpectedStatus {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    /// Cluster health is red.
    #[error("cluster unavailable: status {status}")]
    ClusterUnavailable { status: String },

    /// The response body did not have the expected shape.
    #[error("invalid response for {path}: {message}")]
    InvalidResponse { path: String, message: String },
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The driver version string is not supported.
    #[error("unsupported driver version: {version}")]
    InvalidDriverVersion { version: String },

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {message}")]
    Parse { message: String },

    /// A node URL could not be parsed.
    #[error("invalid node url {url}: {message}")]
    InvalidNodeUrl { url: String, message: String },

    /// An index name cannot be used in a request path.
    #[error("invalid index name {index:?}: {message}")]
    InvalidIndexName { index: String, message: String },
}

/// Result type for adaptor operations.
pub type AdaptorResult<T> = Result<T, AdaptorError>;
