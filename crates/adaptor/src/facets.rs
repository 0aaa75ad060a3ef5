//! Facet structures for faceted search navigation.
//!
//! A facet group summarizes a parent node (typically a folder of tags or
//! categories) together with the children that act as selectable facets.
//! Field names serialize in camelCase for templates and UI code.

use std::collections::BTreeMap;

use crsearch_repository::Node;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Property holding a node's display title.
pub const TITLE_PROPERTY: &str = "title";

/// One selectable facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetEntry {
    /// Identifier of the facet node.
    pub identifier: String,
    /// Display title of the facet node.
    pub node_name: Option<Value>,
    /// Node type name of the facet node.
    pub node_type: String,
}

/// A parent node and its facet children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetGroup {
    /// Node type name of the parent.
    pub node_type: String,
    /// Display title of the parent.
    pub name: Option<Value>,
    /// Identifier of the parent.
    pub identifier: String,
    /// Visibility of the parent.
    pub is_visible: bool,
    /// Facet children, in repository order.
    pub facets: Vec<FacetEntry>,
}

/// Identifier and title of a node, as used by the legacy facet list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFacet {
    /// Identifier of the node.
    pub identifier: String,
    /// Display title of the node.
    pub node_name: Option<Value>,
}

/// A single-entry map from node identifier to [`NodeFacet`].
pub type NodeFacetMap = BTreeMap<String, NodeFacet>;

/// Reads the display title of a node.
///
/// The value is passed through as stored, so numeric or translated
/// (object) titles reach the template unchanged.
pub fn node_title(node: &dyn Node) -> Option<Value> {
    node.property(TITLE_PROPERTY)
}

/// Builds the facet group of `node`, with children restricted by `facet_type`.
pub fn convert_parent_node_to_facets(node: &dyn Node, facet_type: Option<&str>) -> FacetGroup {
    let facets = node
        .child_nodes(facet_type)
        .iter()
        .map(|child| FacetEntry {
            identifier: child.identifier().to_string(),
            node_name: node_title(child.as_ref()),
            node_type: child.node_type().name().to_string(),
        })
        .collect();

    let group = FacetGroup {
        node_type: node.node_type().name().to_string(),
        name: node_title(node),
        identifier: node.identifier().to_string(),
        is_visible: node.is_visible(),
        facets,
    };

    tracing::debug!(
        "Built facet group '{}' ({}) with {} facets",
        group.identifier,
        group.node_type,
        group.facets.len()
    );

    group
}

/// Maps every node to a single-entry map keyed by its identifier.
///
/// This is the legacy list shape; callers wanting one lookup table have to
/// merge the maps themselves.
pub fn convert_array_of_nodes_to_facet_group<I>(nodes: I) -> Vec<NodeFacetMap>
where
    I: IntoIterator,
    I::Item: Node,
{
    nodes
        .into_iter()
        .map(|node| {
            let identifier = node.identifier().to_string();
            let facet = NodeFacet {
                identifier: identifier.clone(),
                node_name: node_title(&node),
            };
            BTreeMap::from([(identifier, facet)])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crsearch_repository::{MemoryNode, NodeTypeDefinition, NodeTypeManager};
    use serde_json::json;

    use super::*;

    fn types() -> NodeTypeManager {
        let types = NodeTypeManager::new();
        types
            .register_all([
                NodeTypeDefinition::new("Site:Folder"),
                NodeTypeDefinition::new("Site:Tag"),
                NodeTypeDefinition::new("Site:Text"),
            ])
            .unwrap();
        types
    }

    #[test]
    fn test_parent_with_matching_children() {
        let types = types();
        let tag = |id: &str, title: &str| {
            MemoryNode::new(id, format!("/tags/{}", id), types.get("Site:Tag").unwrap())
                .with_property("title", json!(title))
        };

        let folder = MemoryNode::new("f1", "/tags", types.get("Site:Folder").unwrap())
            .with_property("title", json!("Tools"))
            .with_child(tag("t1", "Bohren"))
            .with_child(MemoryNode::new("x1", "/tags/x1", types.get("Site:Text").unwrap()))
            .with_child(tag("t2", "Handrad"));

        let group = convert_parent_node_to_facets(&folder, Some("Site:Tag"));

        assert_eq!(group.node_type, "Site:Folder");
        assert_eq!(group.name, Some(json!("Tools")));
        assert_eq!(group.identifier, "f1");
        assert!(group.is_visible);
        assert_eq!(
            group.facets,
            vec![
                FacetEntry {
                    identifier: "t1".to_string(),
                    node_name: Some(json!("Bohren")),
                    node_type: "Site:Tag".to_string(),
                },
                FacetEntry {
                    identifier: "t2".to_string(),
                    node_name: Some(json!("Handrad")),
                    node_type: "Site:Tag".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parent_without_matching_children() {
        let types = types();
        let folder = MemoryNode::new("f1", "/tags", types.get("Site:Folder").unwrap())
            .with_child(MemoryNode::new("x1", "/tags/x1", types.get("Site:Text").unwrap()))
            .hidden();

        let group = convert_parent_node_to_facets(&folder, Some("Site:Tag"));

        assert!(group.facets.is_empty());
        assert_eq!(group.node_type, "Site:Folder");
        assert_eq!(group.identifier, "f1");
        assert_eq!(group.name, None);
        assert!(!group.is_visible);
    }

    #[test]
    fn test_no_filter_lists_all_children() {
        let types = types();
        let folder = MemoryNode::new("f1", "/tags", types.get("Site:Folder").unwrap())
            .with_child(MemoryNode::new("a", "/tags/a", types.get("Site:Tag").unwrap()))
            .with_child(MemoryNode::new("b", "/tags/b", types.get("Site:Text").unwrap()));

        let group = convert_parent_node_to_facets(&folder, None);
        let ids: Vec<&str> = group.facets.iter().map(|f| f.identifier.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_facet_group_serializes_camel_case() {
        let types = types();
        let folder = MemoryNode::new("f1", "/tags", types.get("Site:Folder").unwrap())
            .with_property("title", json!("Tools"))
            .with_child(MemoryNode::new("t1", "/tags/t1", types.get("Site:Tag").unwrap()));

        let value = serde_json::to_value(convert_parent_node_to_facets(&folder, None)).unwrap();
        assert_eq!(
            value,
            json!({
                "nodeType": "Site:Folder",
                "name": "Tools",
                "identifier": "f1",
                "isVisible": true,
                "facets": [
                    { "identifier": "t1", "nodeName": null, "nodeType": "Site:Tag" }
                ]
            })
        );
    }

    #[test]
    fn test_non_string_titles_pass_through() {
        let types = types();
        let folder = MemoryNode::new("f1", "/tags", types.get("Site:Folder").unwrap())
            .with_property("title", json!(2024))
            .with_child(
                MemoryNode::new("t1", "/tags/t1", types.get("Site:Tag").unwrap())
                    .with_property("title", json!({ "de": "Bohren", "en": "Drilling" })),
            );

        let value = serde_json::to_value(convert_parent_node_to_facets(&folder, None)).unwrap();
        assert_eq!(value["name"], json!(2024));
        assert_eq!(
            value["facets"][0]["nodeName"],
            json!({ "de": "Bohren", "en": "Drilling" })
        );

        let maps = convert_array_of_nodes_to_facet_group([&folder]);
        assert_eq!(maps[0]["f1"].node_name, Some(json!(2024)));
    }

    #[test]
    fn test_array_of_nodes_to_facet_maps() {
        let types = types();
        let nodes: Vec<Arc<dyn Node>> = vec![
            Arc::new(
                MemoryNode::new("t1", "/tags/t1", types.get("Site:Tag").unwrap())
                    .with_property("title", json!("Bohren")),
            ),
            Arc::new(MemoryNode::new("t2", "/tags/t2", types.get("Site:Tag").unwrap())),
        ];

        let maps = convert_array_of_nodes_to_facet_group(&nodes);

        assert_eq!(maps.len(), 2);
        assert_eq!(maps[0].len(), 1);
        assert_eq!(maps[0]["t1"].node_name, Some(json!("Bohren")));
        assert_eq!(maps[1]["t2"].identifier, "t2");
        assert_eq!(maps[1]["t2"].node_name, None);
        assert_eq!(
            serde_json::to_value(&maps[0]).unwrap(),
            json!({ "t1": { "identifier": "t1", "nodeName": "Bohren" } })
        );
    }

    #[test]
    fn test_empty_node_list() {
        let nodes: Vec<MemoryNode> = Vec::new();
        assert!(convert_array_of_nodes_to_facet_group(&nodes).is_empty());
    }
}
