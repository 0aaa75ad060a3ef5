//! Search engine drivers.
//!
//! Drivers translate adaptor operations into requests for a specific major
//! version of the search engine. Requests go out through a [`SearchClient`],
//! the boundary to the native client, which this crate does not implement
//! beyond the optional [`EsTransport`] adapter.
//!
//! The 5.x system driver has no behavior of its own: it delegates every call
//! to the 2.x driver so that callers can already depend on a 5.x type.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use crsearch_adaptor::config::AdaptorConfig;
//! use crsearch_adaptor::driver::{system_driver_for, EsTransport};
//!
//! let config = AdaptorConfig::default();
//! let client = Arc::new(EsTransport::new(&config)?);
//! let driver = system_driver_for(&config, client);
//! driver.refresh_index(&config.index_name).await?;
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::config::AdaptorConfig;
use crate::error::{AdaptorResult, ConfigurationError, DriverError};

#[cfg(feature = "elasticsearch")]
mod transport;
pub mod version2;
pub mod version5;

#[cfg(feature = "elasticsearch")]
pub use transport::EsTransport;

/// Supported search engine major versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DriverVersion {
    /// Elasticsearch 2.x.
    Version2,
    /// Elasticsearch 5.x.
    #[default]
    Version5,
}

impl fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverVersion::Version2 => write!(f, "2.x"),
            DriverVersion::Version5 => write!(f, "5.x"),
        }
    }
}

impl FromStr for DriverVersion {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "2" | "2.x" => Ok(DriverVersion::Version2),
            "5" | "5.x" => Ok(DriverVersion::Version5),
            _ => Err(ConfigurationError::InvalidDriverVersion {
                version: s.to_string(),
            }),
        }
    }
}

impl Serialize for DriverVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DriverVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// HTTP methods used by the drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
            HttpMethod::Head => write!(f, "HEAD"),
        }
    }
}

/// A request for the search engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// Absolute path, e.g. `/_stats`.
    pub path: String,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl SearchRequest {
    /// Creates a request without a body.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Attaches a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A response from the search engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body; `Null` when the response had none.
    pub body: Value,
}

impl SearchResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The boundary to a native search engine client.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Sends a request and returns the raw response, whatever its status.
    async fn send(&self, request: SearchRequest) -> Result<SearchResponse, DriverError>;
}

/// Cluster-level operations of a driver.
#[async_trait]
pub trait SystemDriver: Send + Sync {
    /// The engine version this driver targets.
    fn version(&self) -> DriverVersion;

    /// Returns index statistics for the whole cluster.
    async fn status(&self) -> AdaptorResult<Value>;

    /// Makes recently indexed documents of `index` searchable.
    async fn refresh_index(&self, index: &str) -> AdaptorResult<()>;

    /// Returns cluster health; a red cluster is an error.
    async fn cluster_health(&self) -> AdaptorResult<Value>;
}

/// Creates the system driver for `version`.
pub fn system_driver(
    version: DriverVersion,
    client: Arc<dyn SearchClient>,
) -> Box<dyn SystemDriver> {
    tracing::info!("Using system driver for search engine {}", version);
    match version {
        DriverVersion::Version2 => Box::new(version2::SystemDriver::new(client)),
        DriverVersion::Version5 => Box::new(version5::SystemDriver::new(client)),
    }
}

/// Creates the system driver for the configured version.
pub fn system_driver_for(
    config: &AdaptorConfig,
    client: Arc<dyn SearchClient>,
) -> Box<dyn SystemDriver> {
    system_driver(config.driver_version, client)
}
