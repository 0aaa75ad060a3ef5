//! Node type hierarchy flattening.

use std::collections::HashSet;

use crsearch_repository::NodeType;

use crate::error::NodeTypeError;

/// Returns the name of `node_type` followed by the names of all its
/// supertypes, transitively.
///
/// Supertypes are visited depth-first in declaration order and each name is
/// listed once, at its first visit, so diamond hierarchies are flattened.
/// A supertype that leads back to a type still being visited is reported as
/// [`NodeTypeError::CyclicSupertypes`].
///
/// ```
/// use crsearch_adaptor::node_types::extract_node_type_names_and_supertypes;
/// use crsearch_repository::{NodeTypeDefinition, NodeTypeManager};
///
/// let types = NodeTypeManager::new();
/// types.register_all([
///     NodeTypeDefinition::new("A"),
///     NodeTypeDefinition::new("B").with_super_type("A"),
///     NodeTypeDefinition::new("C").with_super_type("A"),
///     NodeTypeDefinition::new("D").with_super_type("B").with_super_type("C"),
/// ]).unwrap();
///
/// let names = extract_node_type_names_and_supertypes(types.get("D").unwrap().as_ref()).unwrap();
/// assert_eq!(names, vec!["D", "B", "A", "C"]);
/// ```
pub fn extract_node_type_names_and_supertypes(
    node_type: &dyn NodeType,
) -> Result<Vec<String>, NodeTypeError> {
    let mut walk = SupertypeWalk {
        root: node_type.name().to_string(),
        names: Vec::new(),
        seen: HashSet::new(),
        trail: Vec::new(),
    };
    walk.visit(node_type)?;
    Ok(walk.names)
}

struct SupertypeWalk {
    root: String,
    /// Output, in first-visit order.
    names: Vec<String>,
    seen: HashSet<String>,
    /// Names on the current descent.
    trail: Vec<String>,
}

impl SupertypeWalk {
    fn visit(&mut self, node_type: &dyn NodeType) -> Result<(), NodeTypeError> {
        let name = node_type.name();

        if let Some(position) = self.trail.iter().position(|n| n == name) {
            let mut cycle = self.trail[position..].to_vec();
            cycle.push(name.to_string());
            return Err(NodeTypeError::CyclicSupertypes {
                node_type: self.root.clone(),
                cycle,
            });
        }

        if !self.seen.insert(name.to_string()) {
            return Ok(());
        }
        self.names.push(name.to_string());

        self.trail.push(name.to_string());
        for super_type in node_type.declared_super_types() {
            self.visit(super_type.as_ref())?;
        }
        self.trail.pop();

        Ok(())
    }
}
