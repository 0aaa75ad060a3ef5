//! Node type filters for child node enumeration.

use serde::{Deserialize, Serialize};

use crate::node_type::NodeType;

/// A parsed node type filter.
///
/// The textual form is a comma-separated list of type names. A leading `!`
/// excludes a type. A node type matches when it is of none of the excluded
/// types and, if any positive types are listed, of at least one of them.
/// Inheritance counts in both directions of the test.
///
/// # Examples
///
/// ```
/// use crsearch_repository::NodeTypeFilter;
///
/// let filter = NodeTypeFilter::parse("Site:Tag, !Site:HiddenTag");
/// assert_eq!(filter.included(), ["Site:Tag"]);
/// assert_eq!(filter.excluded(), ["Site:HiddenTag"]);
///
/// assert!(NodeTypeFilter::parse("").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTypeFilter {
    included: Vec<String>,
    excluded: Vec<String>,
}

impl NodeTypeFilter {
    /// Parses the textual filter form. Blank entries are ignored.
    pub fn parse(filter: &str) -> Self {
        let mut parsed = Self::default();

        for part in filter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.strip_prefix('!') {
                Some(name) => {
                    let name = name.trim();
                    if !name.is_empty() {
                        parsed.excluded.push(name.to_string());
                    }
                }
                None => parsed.included.push(part.to_string()),
            }
        }

        parsed
    }

    /// Parses an optional filter; `None` matches everything.
    pub fn from_option(filter: Option<&str>) -> Self {
        filter.map(Self::parse).unwrap_or_default()
    }

    /// Positive type names.
    pub fn included(&self) -> &[String] {
        &self.included
    }

    /// Excluded type names.
    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    /// Returns true if the filter places no restriction.
    pub fn is_empty(&self) -> bool {
        self.included.is_empty() && self.excluded.is_empty()
    }

    /// Tests a node type against the filter.
    pub fn matches(&self, node_type: &dyn NodeType) -> bool {
        if self.excluded.iter().any(|name| node_type.is_of_type(name)) {
            return false;
        }

        self.included.is_empty() || self.included.iter().any(|name| node_type.is_of_type(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeTypeDefinition, NodeTypeManager};

    fn manager() -> NodeTypeManager {
        let manager = NodeTypeManager::new();
        manager.register(NodeTypeDefinition::new("Base:Content")).unwrap();
        manager
            .register(NodeTypeDefinition::new("Site:Tag").with_super_type("Base:Content"))
            .unwrap();
        manager
            .register(NodeTypeDefinition::new("Site:HiddenTag").with_super_type("Site:Tag"))
            .unwrap();
        manager
            .register(NodeTypeDefinition::new("Site:Text").with_super_type("Base:Content"))
            .unwrap();
        manager
    }

    #[test]
    fn test_parse_ignores_blank_entries() {
        let filter = NodeTypeFilter::parse(" A ,, !B , ! ,");
        assert_eq!(filter.included(), ["A"]);
        assert_eq!(filter.excluded(), ["B"]);
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let types = manager();
        let filter = NodeTypeFilter::from_option(None);
        assert!(filter.is_empty());
        assert!(filter.matches(types.get("Site:Text").unwrap().as_ref()));
    }

    #[test]
    fn test_positive_filter_uses_supertypes() {
        let types = manager();
        let filter = NodeTypeFilter::parse("Site:Tag");
        assert!(filter.matches(types.get("Site:Tag").unwrap().as_ref()));
        assert!(filter.matches(types.get("Site:HiddenTag").unwrap().as_ref()));
        assert!(!filter.matches(types.get("Site:Text").unwrap().as_ref()));
    }

    #[test]
    fn test_negative_filter_wins() {
        let types = manager();
        let filter = NodeTypeFilter::parse("Base:Content,!Site:HiddenTag");
        assert!(filter.matches(types.get("Site:Tag").unwrap().as_ref()));
        assert!(filter.matches(types.get("Site:Text").unwrap().as_ref()));
        assert!(!filter.matches(types.get("Site:HiddenTag").unwrap().as_ref()));
    }

    #[test]
    fn test_only_negative_filter() {
        let types = manager();
        let filter = NodeTypeFilter::parse("!Site:Tag");
        assert!(filter.matches(types.get("Site:Text").unwrap().as_ref()));
        assert!(!filter.matches(types.get("Site:HiddenTag").unwrap().as_ref()));
    }
}
