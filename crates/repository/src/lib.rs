//! Content repository model for the crsearch adaptor.
//!
//! The search adaptor never owns content. It reads nodes and node types from a
//! content repository through the traits defined here:
//!
//! - [`NodeType`] - a named type with declared supertypes
//! - [`Node`] - an identified, typed, property-bearing content item with children
//!
//! Repositories plug in by implementing both traits. This crate also ships an
//! in-memory implementation ([`NodeTypeManager`] and [`MemoryNode`]) that is
//! used by embedders without a repository of their own and by the tests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use crsearch_repository::{MemoryNode, Node, NodeType, NodeTypeDefinition, NodeTypeManager};
//! use serde_json::json;
//!
//! let types = NodeTypeManager::new();
//! types.register(NodeTypeDefinition::new("Base:Document")).unwrap();
//! types
//!     .register(NodeTypeDefinition::new("Site:Page").with_super_type("Base:Document"))
//!     .unwrap();
//!
//! let page_type = types.get("Site:Page").unwrap();
//! assert!(page_type.is_of_type("Base:Document"));
//!
//! let page = MemoryNode::new("a1", "/sites/demo/page", page_type)
//!     .with_property("title", json!("Home"));
//! assert_eq!(page.property("title"), Some(json!("Home")));
//! assert_eq!(page.parent_path().as_deref(), Some("/sites/demo"));
//! # let _ = Arc::new(page);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod filter;
pub mod memory;
pub mod node;
pub mod node_type;
pub mod path;

pub use error::{RepositoryError, RepositoryResult};
pub use filter::NodeTypeFilter;
pub use memory::{MemoryNode, NodeTypeManager};
pub use node::Node;
pub use node_type::{NodeType, NodeTypeDefinition};
