//! Node types and their supertype graph.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A named node type with zero or more declared supertypes.
///
/// Supertypes form a graph that is meant to be acyclic. The repository owns
/// the graph; nothing here guarantees its shape, so traversals must guard
/// against cycles themselves.
pub trait NodeType: Send + Sync {
    /// The fully qualified type name, e.g. `Site:Page`.
    fn name(&self) -> &str;

    /// The directly declared supertypes, in declaration order.
    fn declared_super_types(&self) -> Vec<Arc<dyn NodeType>>;

    /// Returns true if this type is `name` or inherits from it.
    fn is_of_type(&self, name: &str) -> bool {
        if self.name() == name {
            return true;
        }

        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(self.name().to_string());
        let mut pending = self.declared_super_types();

        while let Some(super_type) = pending.pop() {
            if super_type.name() == name {
                return true;
            }
            if visited.insert(super_type.name().to_string()) {
                pending.extend(super_type.declared_super_types());
            }
        }

        false
    }
}

impl<T: NodeType + ?Sized> NodeType for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn declared_super_types(&self) -> Vec<Arc<dyn NodeType>> {
        (**self).declared_super_types()
    }

    fn is_of_type(&self, name: &str) -> bool {
        (**self).is_of_type(name)
    }
}

impl<T: NodeType + ?Sized> NodeType for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn declared_super_types(&self) -> Vec<Arc<dyn NodeType>> {
        (**self).declared_super_types()
    }

    fn is_of_type(&self, name: &str) -> bool {
        (**self).is_of_type(name)
    }
}

impl fmt::Debug for dyn NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeType")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// Declarative description of a node type, as registered with a
/// [`NodeTypeManager`](crate::NodeTypeManager).
///
/// Supertypes are referenced by name and resolved when the type is read back
/// from the registry.
///
/// # Examples
///
/// ```
/// use crsearch_repository::NodeTypeDefinition;
///
/// let definition = NodeTypeDefinition::new("Site:Page")
///     .with_super_type("Base:Document")
///     .with_super_type("Mixin:Hideable");
///
/// assert_eq!(definition.super_types, vec!["Base:Document", "Mixin:Hideable"]);
/// assert!(!definition.abstract_type);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTypeDefinition {
    /// The fully qualified type name.
    pub name: String,

    /// Names of the declared supertypes, in declaration order.
    #[serde(default, rename = "superTypes")]
    pub super_types: Vec<String>,

    /// Abstract types cannot be instantiated but still take part in inheritance.
    #[serde(default, rename = "abstract")]
    pub abstract_type: bool,
}

impl NodeTypeDefinition {
    /// Creates a definition without supertypes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_types: Vec::new(),
            abstract_type: false,
        }
    }

    /// Appends a declared supertype.
    pub fn with_super_type(mut self, name: impl Into<String>) -> Self {
        self.super_types.push(name.into());
        self
    }

    /// Marks the type as abstract.
    pub fn as_abstract(mut self) -> Self {
        self.abstract_type = true;
        self
    }
}
