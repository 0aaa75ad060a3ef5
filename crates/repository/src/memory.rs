//! In-memory content repository.
//!
//! [`NodeTypeManager`] keeps node type definitions in a shared registry and
//! hands out [`NodeType`] handles that resolve their supertypes by name on
//! every read. Because resolution is lazy, the registry can hold dangling or
//! cyclic supertype references exactly like a misconfigured repository would.
//!
//! [`MemoryNode`] is a plain owned node tree.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{RepositoryError, RepositoryResult};
use crate::filter::NodeTypeFilter;
use crate::node::Node;
use crate::node_type::{NodeType, NodeTypeDefinition};

/// Shared registry of node type definitions.
///
/// Cloning the manager clones the handle, not the registry.
#[derive(Clone, Default)]
pub struct NodeTypeManager {
    definitions: Arc<RwLock<HashMap<String, NodeTypeDefinition>>>,
}

impl fmt::Debug for NodeTypeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeTypeManager")
            .field("len", &self.definitions.read().len())
            .finish()
    }
}

impl NodeTypeManager {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition. Supertypes do not need to exist yet.
    pub fn register(&self, definition: NodeTypeDefinition) -> RepositoryResult<()> {
        if definition.name.is_empty() {
            return Err(RepositoryError::EmptyNodeTypeName);
        }

        let mut definitions = self.definitions.write();
        if definitions.contains_key(&definition.name) {
            return Err(RepositoryError::NodeTypeAlreadyRegistered {
                name: definition.name,
            });
        }

        tracing::debug!(
            "Registered node type '{}' with {} declared supertypes",
            definition.name,
            definition.super_types.len()
        );
        definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Registers several definitions, stopping at the first failure.
    pub fn register_all(
        &self,
        definitions: impl IntoIterator<Item = NodeTypeDefinition>,
    ) -> RepositoryResult<()> {
        for definition in definitions {
            self.register(definition)?;
        }
        Ok(())
    }

    /// Returns a handle on the named type.
    pub fn get(&self, name: &str) -> Option<Arc<dyn NodeType>> {
        if !self.has(name) {
            return None;
        }

        Some(Arc::new(ManagedNodeType {
            name: name.to_string(),
            manager: self.clone(),
        }))
    }

    /// Like [`get`](Self::get), but reports a missing type as an error.
    pub fn require(&self, name: &str) -> RepositoryResult<Arc<dyn NodeType>> {
        self.get(name)
            .ok_or_else(|| RepositoryError::NodeTypeNotFound {
                name: name.to_string(),
            })
    }

    /// Returns a copy of the stored definition.
    pub fn definition(&self, name: &str) -> Option<NodeTypeDefinition> {
        self.definitions.read().get(name).cloned()
    }

    /// Returns true if the named type is registered.
    pub fn has(&self, name: &str) -> bool {
        self.definitions.read().contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.definitions.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.read().is_empty()
    }
}

/// A node type handle bound to its registry.
struct ManagedNodeType {
    name: String,
    manager: NodeTypeManager,
}

impl NodeType for ManagedNodeType {
    fn name(&self) -> &str {
        &self.name
    }

    fn declared_super_types(&self) -> Vec<Arc<dyn NodeType>> {
        let Some(definition) = self.manager.definition(&self.name) else {
            return Vec::new();
        };

        definition
            .super_types
            .iter()
            .filter_map(|super_type| {
                let resolved = self.manager.get(super_type);
                if resolved.is_none() {
                    tracing::warn!(
                        "Node type '{}' declares unknown supertype '{}'",
                        self.name,
                        super_type
                    );
                }
                resolved
            })
            .collect()
    }
}

/// An owned in-memory node.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use crsearch_repository::{MemoryNode, Node, NodeTypeDefinition, NodeTypeManager};
///
/// let types = NodeTypeManager::new();
/// types.register(NodeTypeDefinition::new("Site:Tag")).unwrap();
/// types.register(NodeTypeDefinition::new("Site:Folder")).unwrap();
///
/// let folder = MemoryNode::new("f1", "/tags", types.get("Site:Folder").unwrap())
///     .with_child(MemoryNode::new("t1", "/tags/red", types.get("Site:Tag").unwrap()))
///     .with_child(MemoryNode::new("f2", "/tags/sub", types.get("Site:Folder").unwrap()));
///
/// let tags = folder.child_nodes(Some("Site:Tag"));
/// assert_eq!(tags.len(), 1);
/// assert_eq!(tags[0].identifier(), "t1");
/// ```
#[derive(Clone)]
pub struct MemoryNode {
    identifier: String,
    path: String,
    node_type: Arc<dyn NodeType>,
    properties: BTreeMap<String, Value>,
    visible: bool,
    children: Vec<Arc<dyn Node>>,
}

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryNode")
            .field("identifier", &self.identifier)
            .field("path", &self.path)
            .field("node_type", &self.node_type.name())
            .field("properties", &self.properties)
            .field("visible", &self.visible)
            .field("children", &self.children.len())
            .finish()
    }
}

impl MemoryNode {
    /// Creates a visible node without properties or children.
    pub fn new(
        identifier: impl Into<String>,
        path: impl Into<String>,
        node_type: Arc<dyn NodeType>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            path: path.into(),
            node_type,
            properties: BTreeMap::new(),
            visible: true,
            children: Vec::new(),
        }
    }

    /// Sets a property.
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: impl Node + 'static) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    /// Marks the node as hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl Node for MemoryNode {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn node_type(&self) -> Arc<dyn NodeType> {
        Arc::clone(&self.node_type)
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn child_nodes(&self, node_type_filter: Option<&str>) -> Vec<Arc<dyn Node>> {
        let filter = NodeTypeFilter::from_option(node_type_filter);
        if filter.is_empty() {
            return self.children.clone();
        }

        self.children
            .iter()
            .filter(|child| filter.matches(child.node_type().as_ref()))
            .cloned()
            .collect()
    }
}
