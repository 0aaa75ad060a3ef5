//! Content nodes.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::node_type::NodeType;
use crate::path;

/// An identified, typed content item.
///
/// Property reads and child enumeration go to the repository, which may load
/// or cache them however it likes. Implementations return owned values so
/// they are free to hold locks only for the duration of a call.
pub trait Node: Send + Sync {
    /// The stable node identifier.
    fn identifier(&self) -> &str;

    /// The slash-delimited location of the node.
    fn path(&self) -> &str;

    /// The node's type.
    fn node_type(&self) -> Arc<dyn NodeType>;

    /// Reads a named property. Missing properties are `None`.
    fn property(&self, name: &str) -> Option<Value>;

    /// Whether the node is visible to visitors.
    fn is_visible(&self) -> bool;

    /// Child nodes, optionally restricted by a node type filter such as
    /// `"Site:Tag,!Site:Hidden"` (see [`NodeTypeFilter`](crate::NodeTypeFilter)).
    fn child_nodes(&self, node_type_filter: Option<&str>) -> Vec<Arc<dyn Node>>;

    /// The path of the parent node, if there is one.
    fn parent_path(&self) -> Option<String> {
        path::parent_path(self.path())
    }
}

impl<T: Node + ?Sized> Node for &T {
    fn identifier(&self) -> &str {
        (**self).identifier()
    }

    fn path(&self) -> &str {
        (**self).path()
    }

    fn node_type(&self) -> Arc<dyn NodeType> {
        (**self).node_type()
    }

    fn property(&self, name: &str) -> Option<Value> {
        (**self).property(name)
    }

    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }

    fn child_nodes(&self, node_type_filter: Option<&str>) -> Vec<Arc<dyn Node>> {
        (**self).child_nodes(node_type_filter)
    }

    fn parent_path(&self) -> Option<String> {
        (**self).parent_path()
    }
}

impl<T: Node + ?Sized> Node for Arc<T> {
    fn identifier(&self) -> &str {
        (**self).identifier()
    }

    fn path(&self) -> &str {
        (**self).path()
    }

    fn node_type(&self) -> Arc<dyn NodeType> {
        (**self).node_type()
    }

    fn property(&self, name: &str) -> Option<Value> {
        (**self).property(name)
    }

    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }

    fn child_nodes(&self, node_type_filter: Option<&str>) -> Vec<Arc<dyn Node>> {
        (**self).child_nodes(node_type_filter)
    }

    fn parent_path(&self) -> Option<String> {
        (**self).parent_path()
    }
}

impl fmt::Debug for dyn Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("identifier", &self.identifier())
            .field("path", &self.path())
            .finish_non_exhaustive()
    }
}
