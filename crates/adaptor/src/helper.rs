//! The search helper exposed to the expression runtime.
//!
//! Templates reach every search feature through one [`SearchHelper`]
//! instance: they start queries, expand paths and node types for filters,
//! and shape nodes into facet structures for navigation.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use crsearch_adaptor::context::ProtectedContextAware;
//! use crsearch_adaptor::fulltext::FulltextHelper;
//! use crsearch_adaptor::helper::SearchHelper;
//! use crsearch_repository::{MemoryNode, NodeTypeDefinition, NodeTypeManager};
//!
//! let types = NodeTypeManager::new();
//! types.register(NodeTypeDefinition::new("Site:Folder")).unwrap();
//! types.register(NodeTypeDefinition::new("Site:Tag")).unwrap();
//!
//! let folder = MemoryNode::new("f1", "/tags", types.get("Site:Folder").unwrap())
//!     .with_child(MemoryNode::new("t1", "/tags/t1", types.get("Site:Tag").unwrap()));
//!
//! let helper = SearchHelper::new(Arc::new(FulltextHelper::new()));
//! let group = helper.convert_parent_node_to_facets(&folder, Some("Site:Tag"));
//!
//! assert_eq!(group.facets.len(), 1);
//! assert_eq!(helper.build_all_path_prefixes("/tags/t1"), vec!["/tags", "/tags/t1"]);
//! assert!(helper.allows_call_of_method("query"));
//! ```

use std::sync::Arc;

use crsearch_repository::{Node, NodeType};

use crate::config::AdaptorConfig;
use crate::context::{MethodCallPolicy, ProtectedContextAware};
use crate::error::NodeTypeError;
use crate::facets::{self, FacetGroup, NodeFacetMap};
use crate::fulltext::FulltextHelper;
use crate::node_types;
use crate::paths;
use crate::query::QueryBuilder;

/// Search helpers for templates.
#[derive(Debug, Clone)]
pub struct SearchHelper {
    fulltext: Arc<FulltextHelper>,
    policy: MethodCallPolicy,
}

impl SearchHelper {
    /// Creates a helper sharing `fulltext` and allowing every method.
    pub fn new(fulltext: Arc<FulltextHelper>) -> Self {
        Self {
            fulltext,
            policy: MethodCallPolicy::AllowAll,
        }
    }

    /// Creates a helper with the configured method call policy.
    pub fn from_config(config: &AdaptorConfig, fulltext: Arc<FulltextHelper>) -> Self {
        Self::new(fulltext).with_policy(config.method_call_policy.clone())
    }

    /// Replaces the method call policy.
    pub fn with_policy(mut self, policy: MethodCallPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Starts a query for the documents below `node`.
    pub fn query(&self, node: &dyn Node) -> QueryBuilder {
        QueryBuilder::new(node)
    }

    /// The shared fulltext helper.
    pub fn fulltext(&self) -> &Arc<FulltextHelper> {
        &self.fulltext
    }

    /// See [`paths::build_all_path_prefixes`].
    pub fn build_all_path_prefixes(&self, path: &str) -> Vec<String> {
        paths::build_all_path_prefixes(path)
    }

    /// See [`node_types::extract_node_type_names_and_supertypes`].
    pub fn extract_node_type_names_and_supertypes(
        &self,
        node_type: &dyn NodeType,
    ) -> Result<Vec<String>, NodeTypeError> {
        node_types::extract_node_type_names_and_supertypes(node_type)
    }

    /// Returns the identifiers of `nodes`, in order.
    pub fn convert_array_of_nodes_to_array_of_node_identifiers<I>(&self, nodes: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: Node,
    {
        nodes
            .into_iter()
            .map(|node| node.identifier().to_string())
            .collect()
    }

    /// See [`facets::convert_array_of_nodes_to_facet_group`].
    pub fn convert_array_of_nodes_to_facet_group<I>(&self, nodes: I) -> Vec<NodeFacetMap>
    where
        I: IntoIterator,
        I::Item: Node,
    {
        facets::convert_array_of_nodes_to_facet_group(nodes)
    }

    /// See [`facets::convert_parent_node_to_facets`].
    pub fn convert_parent_node_to_facets(
        &self,
        node: &dyn Node,
        facet_type: Option<&str>,
    ) -> FacetGroup {
        facets::convert_parent_node_to_facets(node, facet_type)
    }
}

impl ProtectedContextAware for SearchHelper {
    fn allows_call_of_method(&self, method_name: &str) -> bool {
        self.policy.permits(method_name)
    }
}

#[cfg(test)]
mod tests {
    use crsearch_repository::{MemoryNode, NodeTypeDefinition, NodeTypeManager};

    use super::*;

    fn helper() -> SearchHelper {
        SearchHelper::new(Arc::new(FulltextHelper::new()))
    }

    #[test]
    fn test_identifiers_keep_order() {
        let types = NodeTypeManager::new();
        types.register(NodeTypeDefinition::new("T")).unwrap();
        let nodes: Vec<MemoryNode> = ["c", "a", "b"]
            .iter()
            .map(|id| MemoryNode::new(*id, format!("/{}", id), types.get("T").unwrap()))
            .collect();

        assert_eq!(
            helper().convert_array_of_nodes_to_array_of_node_identifiers(&nodes),
            vec!["c", "a", "b"]
        );
    }

    #[test]
    fn test_identifiers_of_empty_input() {
        let nodes: Vec<MemoryNode> = Vec::new();
        assert!(
            helper()
                .convert_array_of_nodes_to_array_of_node_identifiers(nodes)
                .is_empty()
        );
    }

    #[test]
    fn test_fulltext_instance_is_shared() {
        let fulltext = Arc::new(FulltextHelper::new());
        let helper = SearchHelper::new(Arc::clone(&fulltext));
        assert!(Arc::ptr_eq(helper.fulltext(), &fulltext));
    }

    #[test]
    fn test_allows_every_method_by_default() {
        let helper = helper();
        for name in ["", "query", "getFulltext", "unknownMethod", "__destruct"] {
            assert!(helper.allows_call_of_method(name));
        }
    }

    #[test]
    fn test_configured_policy() {
        let config = AdaptorConfig {
            method_call_policy: MethodCallPolicy::allow_only(["query"]),
            ..Default::default()
        };
        let helper = SearchHelper::from_config(&config, Arc::new(FulltextHelper::new()));
        assert!(helper.allows_call_of_method("query"));
        assert!(!helper.allows_call_of_method("getFulltext"));
    }

    #[test]
    fn test_query_is_scoped_to_node() {
        let types = NodeTypeManager::new();
        types.register(NodeTypeDefinition::new("T")).unwrap();
        let node = MemoryNode::new("n", "/sites/demo", types.get("T").unwrap());

        let builder = helper().query(&node);
        assert_eq!(builder.context_path(), "/sites/demo");
    }
}
