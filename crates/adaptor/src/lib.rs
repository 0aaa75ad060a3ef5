//! Elasticsearch adaptor helpers for content repository nodes.
//!
//! This crate sits between a template expression runtime and a search engine.
//! It does not talk to the content repository directly; it reads nodes and
//! node types through the traits in [`crsearch_repository`].
//!
//! # Features
//!
//! - `elasticsearch` - a [`SearchClient`](driver::SearchClient) backed by the
//!   official Elasticsearch client
//!
//! # Architecture
//!
//! - [`helper`] - the [`SearchHelper`] facade templates call into
//! - [`query`] - the Query DSL builder scoped to a context node
//! - [`facets`] - facet group structures for faceted navigation
//! - [`paths`], [`node_types`] - path prefix and type hierarchy expansion
//! - [`fulltext`] - HTML fulltext bucket extraction
//! - [`document`] - the system fields of indexed node documents
//! - [`driver`] - version-specific system drivers
//! - [`context`] - method access control for the expression sandbox
//! - [`config`], [`error`] - configuration and errors
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use crsearch_adaptor::{AdaptorConfig, FulltextHelper, SearchHelper};
//! use crsearch_repository::{MemoryNode, NodeTypeDefinition, NodeTypeManager};
//!
//! let types = NodeTypeManager::new();
//! types.register(NodeTypeDefinition::new("Base:Document")).unwrap();
//! types
//!     .register(NodeTypeDefinition::new("Site:Product").with_super_type("Base:Document"))
//!     .unwrap();
//!
//! let config = AdaptorConfig::default();
//! let helper = SearchHelper::from_config(&config, Arc::new(FulltextHelper::new()));
//!
//! let product_type = types.get("Site:Product").unwrap();
//! assert_eq!(
//!     helper.extract_node_type_names_and_supertypes(product_type.as_ref()).unwrap(),
//!     vec!["Site:Product", "Base:Document"]
//! );
//!
//! let site = MemoryNode::new("s1", "/sites/demo", product_type);
//! let request = helper.query(&site).node_type("Site:Product").limit(10).request();
//! assert_eq!(request["size"], 10);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod context;
pub mod document;
pub mod driver;
pub mod error;
pub mod facets;
pub mod fulltext;
pub mod helper;
pub mod node_types;
pub mod paths;
pub mod query;

// Re-export commonly used types at crate root
pub use config::AdaptorConfig;
pub use context::{MethodCallPolicy, ProtectedContextAware};
pub use error::{AdaptorError, AdaptorResult};
pub use facets::{FacetEntry, FacetGroup};
pub use fulltext::FulltextHelper;
pub use helper::SearchHelper;
pub use query::QueryBuilder;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
