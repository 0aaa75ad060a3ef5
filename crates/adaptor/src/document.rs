//! Index document fields for content nodes.
//!
//! The query builder filters on a handful of system fields. This module
//! produces those fields for a node so that every indexed document carries
//! them in the same shape:
//!
//! - `__identifier` - the node identifier
//! - `__path` - the node path
//! - `__parentPath` - every prefix of the parent path, so one term filter
//!   matches all descendants of a node
//! - `__typeAndSupertypes` - the node type and all its supertypes, so one
//!   term filter matches all subtypes of a type
//! - `_hidden` - the inverse of the node's visibility
//! - `__fulltext` - fulltext buckets built from HTML properties

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value, json};

use crsearch_repository::Node;

use crate::config::AdaptorConfig;
use crate::error::AdaptorResult;
use crate::fulltext::FulltextHelper;
use crate::node_types::extract_node_type_names_and_supertypes;
use crate::paths::build_all_path_prefixes;

/// Node identifier field.
pub const IDENTIFIER_FIELD: &str = "__identifier";
/// Node path field.
pub const PATH_FIELD: &str = "__path";
/// Parent path prefixes field.
pub const PARENT_PATH_FIELD: &str = "__parentPath";
/// Type and supertype names field.
pub const TYPE_AND_SUPERTYPES_FIELD: &str = "__typeAndSupertypes";
/// Hidden flag field.
pub const HIDDEN_FIELD: &str = "_hidden";
/// Fulltext buckets field.
pub const FULLTEXT_FIELD: &str = "__fulltext";

/// Builds index documents for nodes.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    fulltext: Arc<FulltextHelper>,
    fulltext_properties: Vec<String>,
}

impl DocumentBuilder {
    /// Creates a builder extracting fulltext from `fulltext_properties`.
    pub fn new(fulltext: Arc<FulltextHelper>, fulltext_properties: Vec<String>) -> Self {
        Self {
            fulltext,
            fulltext_properties,
        }
    }

    /// Creates a builder using the configured fulltext properties.
    pub fn from_config(config: &AdaptorConfig, fulltext: Arc<FulltextHelper>) -> Self {
        Self::new(fulltext, config.fulltext_properties.clone())
    }

    /// Builds the document for `node`, copying the listed `properties`.
    ///
    /// Missing properties are left out. Fails only if the node type's
    /// supertype graph is cyclic.
    pub fn build(&self, node: &dyn Node, properties: &[&str]) -> AdaptorResult<Value> {
        let type_names = extract_node_type_names_and_supertypes(node.node_type().as_ref())?;
        let parent_prefixes = node
            .parent_path()
            .map(|parent| build_all_path_prefixes(&parent))
            .unwrap_or_default();

        let mut document = Map::new();
        for name in properties {
            if let Some(value) = node.property(name) {
                document.insert((*name).to_string(), value);
            }
        }

        document.insert(IDENTIFIER_FIELD.to_string(), json!(node.identifier()));
        document.insert(PATH_FIELD.to_string(), json!(node.path()));
        document.insert(PARENT_PATH_FIELD.to_string(), json!(parent_prefixes));
        document.insert(TYPE_AND_SUPERTYPES_FIELD.to_string(), json!(type_names));
        document.insert(HIDDEN_FIELD.to_string(), json!(!node.is_visible()));
        document.insert(FULLTEXT_FIELD.to_string(), json!(self.fulltext_buckets(node)));

        tracing::debug!(
            "Built document for node '{}' at '{}'",
            node.identifier(),
            node.path()
        );

        Ok(Value::Object(document))
    }

    /// Merges the fulltext buckets of all configured string properties.
    pub fn fulltext_buckets(&self, node: &dyn Node) -> BTreeMap<String, String> {
        let mut merged: BTreeMap<String, String> = BTreeMap::new();

        for property in &self.fulltext_properties {
            let Some(Value::String(html)) = node.property(property) else {
                continue;
            };

            for (bucket, text) in self.fulltext.extract_html_tags(&html) {
                if text.is_empty() {
                    continue;
                }
                let entry = merged.entry(bucket).or_default();
                if !entry.is_empty() {
                    entry.push(' ');
                }
                entry.push_str(&text);
            }
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use crsearch_repository::{MemoryNode, NodeTypeDefinition, NodeTypeManager};
    use serde_json::json;

    use super::*;
    use crate::error::AdaptorError;

    fn types() -> NodeTypeManager {
        let types = NodeTypeManager::new();
        types
            .register_all([
                NodeTypeDefinition::new("Base:Document"),
                NodeTypeDefinition::new("Site:Product").with_super_type("Base:Document"),
            ])
            .unwrap();
        types
    }

    fn builder() -> DocumentBuilder {
        DocumentBuilder::from_config(&AdaptorConfig::default(), Arc::new(FulltextHelper::new()))
    }

    #[test]
    fn test_system_fields() {
        let types = types();
        let node = MemoryNode::new(
            "p1",
            "/sites/demo/products/drill",
            types.get("Site:Product").unwrap(),
        )
        .with_property("price", json!(99))
        .hidden();

        let document = builder().build(&node, &["price", "missing"]).unwrap();

        assert_eq!(document["__identifier"], "p1");
        assert_eq!(document["__path"], "/sites/demo/products/drill");
        assert_eq!(
            document["__parentPath"],
            json!(["/sites", "/sites/demo", "/sites/demo/products"])
        );
        assert_eq!(
            document["__typeAndSupertypes"],
            json!(["Site:Product", "Base:Document"])
        );
        assert_eq!(document["_hidden"], true);
        assert_eq!(document["price"], 99);
        assert!(document.get("missing").is_none());
    }

    #[test]
    fn test_root_level_node_has_root_parent() {
        let types = types();
        let node = MemoryNode::new("r", "/sites", types.get("Base:Document").unwrap());
        let document = builder().build(&node, &[]).unwrap();
        assert_eq!(document["__parentPath"], json!(["/"]));
    }

    #[test]
    fn test_fulltext_buckets_merge_properties() {
        let types = types();
        let node = MemoryNode::new("p1", "/p1", types.get("Site:Product").unwrap())
            .with_property("title", json!("Cordless drill"))
            .with_property("text", json!("<h2>Specs</h2><p>18 V battery</p>"))
            .with_property("ignored", json!("<h1>Not indexed</h1>"));

        let buckets = builder().fulltext_buckets(&node);

        assert_eq!(buckets["text"], "Cordless drill 18 V battery");
        assert_eq!(buckets["h2"], "Specs");
        assert!(!buckets.contains_key("h1"));
    }

    #[test]
    fn test_cyclic_type_fails() {
        let types = NodeTypeManager::new();
        types
            .register(NodeTypeDefinition::new("Loop").with_super_type("Loop"))
            .unwrap();
        let node = MemoryNode::new("n", "/n", types.get("Loop").unwrap());

        assert!(matches!(
            builder().build(&node, &[]),
            Err(AdaptorError::NodeType(_))
        ));
    }
}
