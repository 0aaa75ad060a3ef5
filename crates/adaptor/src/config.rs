//! Adaptor configuration.
//!
//! # Example
//!
//! ```
//! use crsearch_adaptor::config::AdaptorConfig;
//! use crsearch_adaptor::driver::DriverVersion;
//!
//! let config = AdaptorConfig::from_json(r#"{
//!     "driver_version": "2.x",
//!     "index_name": "site",
//!     "nodes": ["http://search:9200"]
//! }"#).unwrap();
//!
//! assert_eq!(config.driver_version, DriverVersion::Version2);
//! assert_eq!(config.index_name, "site");
//! assert_eq!(config.request_timeout_ms, 30000);
//! ```

use serde::{Deserialize, Serialize};

use crate::context::MethodCallPolicy;
use crate::driver::DriverVersion;
use crate::error::{AdaptorResult, ConfigurationError};

/// Authentication configuration for the search engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchAuth {
    /// Basic username/password authentication.
    Basic {
        /// The username for basic auth.
        username: String,
        /// The password for basic auth.
        password: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// The bearer token.
        token: String,
    },
}

/// Configuration for the search adaptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptorConfig {
    /// Major version of the search engine (default: `5.x`).
    #[serde(default)]
    pub driver_version: DriverVersion,

    /// Name of the index holding the node documents (default: `"contentrepository"`).
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Search engine node URLs (e.g., `["http://localhost:9200"]`).
    /// Currently uses the first node (single-node connection pool).
    #[serde(default = "default_nodes")]
    pub nodes: Vec<String>,

    /// Optional authentication.
    #[serde(default)]
    pub auth: Option<SearchAuth>,

    /// Request timeout in milliseconds (default: 30000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Whether to disable certificate validation (default: false).
    /// Only use for development/testing.
    #[serde(default)]
    pub disable_certificate_validation: bool,

    /// Node properties whose HTML content is split into fulltext buckets
    /// (default: `["title", "text"]`).
    #[serde(default = "default_fulltext_properties")]
    pub fulltext_properties: Vec<String>,

    /// Which helper methods templates may call (default: all).
    #[serde(default)]
    pub method_call_policy: MethodCallPolicy,
}

/// Node URL used when none is configured.
pub const DEFAULT_NODE: &str = "http://localhost:9200";

fn default_index_name() -> String {
    "contentrepository".to_string()
}

fn default_nodes() -> Vec<String> {
    vec![DEFAULT_NODE.to_string()]
}

fn default_request_timeout_ms() -> u64 {
    30000
}

fn default_fulltext_properties() -> Vec<String> {
    vec!["title".to_string(), "text".to_string()]
}

impl Default for AdaptorConfig {
    fn default() -> Self {
        Self {
            driver_version: DriverVersion::default(),
            index_name: default_index_name(),
            nodes: default_nodes(),
            auth: None,
            request_timeout_ms: default_request_timeout_ms(),
            disable_certificate_validation: false,
            fulltext_properties: default_fulltext_properties(),
            method_call_policy: MethodCallPolicy::default(),
        }
    }
}

impl AdaptorConfig {
    /// Parses a JSON configuration document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> AdaptorResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigurationError::Parse {
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// The node URL the client connects to.
    pub fn primary_node(&self) -> &str {
        self.nodes.first().map_or(DEFAULT_NODE, String::as_str)
    }
}
