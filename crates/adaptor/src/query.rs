//! Elasticsearch Query DSL builder scoped to a content node.
//!
//! Queries only ever see documents below their context node: the builder
//! starts with a `__parentPath` filter on the node's path and hides nodes
//! that are hidden or outside their visibility window.

use serde_json::{Value, json};

use crsearch_repository::Node;

use crate::document::{HIDDEN_FIELD, PARENT_PATH_FIELD, PATH_FIELD, TYPE_AND_SUPERTYPES_FIELD};

/// Which part of the filter `bool` a filter clause goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterClause {
    /// Every clause must match.
    Must,
    /// At least one clause must match.
    Should,
    /// No clause may match.
    MustNot,
}

/// Sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Builds a search request for the documents below a context node.
///
/// # Examples
///
/// ```
/// use crsearch_adaptor::query::QueryBuilder;
/// use crsearch_repository::{MemoryNode, NodeTypeDefinition, NodeTypeManager};
///
/// let types = NodeTypeManager::new();
/// types.register(NodeTypeDefinition::new("Site:Page")).unwrap();
/// let site = MemoryNode::new("s1", "/sites/demo", types.get("Site:Page").unwrap());
///
/// let request = QueryBuilder::new(&site)
///     .node_type("Site:Product")
///     .exact_match("color", "red")
///     .sort_desc("price")
///     .limit(10)
///     .request();
///
/// assert_eq!(request["size"], 10);
/// assert_eq!(request["sort"][0]["price"]["order"], "desc");
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    context_path: String,
    must: Vec<Value>,
    filter_must: Vec<Value>,
    filter_should: Vec<Value>,
    filter_must_not: Vec<Value>,
    sort: Vec<Value>,
    size: Option<usize>,
    from: Option<usize>,
}

impl QueryBuilder {
    /// Creates a query for the documents below `context_node`.
    pub fn new(context_node: &dyn Node) -> Self {
        let context_path = context_node.path().to_string();

        Self {
            must: vec![json!({ "match_all": {} })],
            filter_must: vec![json!({ "term": { PARENT_PATH_FIELD: context_path } })],
            filter_should: Vec::new(),
            filter_must_not: vec![
                json!({ "term": { HIDDEN_FIELD: true } }),
                json!({ "range": { "_hiddenBeforeDateTime": { "gt": "now" } } }),
                json!({ "range": { "_hiddenAfterDateTime": { "lt": "now" } } }),
            ],
            sort: Vec::new(),
            size: None,
            from: None,
            context_path,
        }
    }

    /// Path of the context node.
    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    /// Restricts results to nodes of `node_type`, including subtypes.
    pub fn node_type(self, node_type: &str) -> Self {
        self.query_filter(
            "term",
            json!({ TYPE_AND_SUPERTYPES_FIELD: node_type }),
            FilterClause::Must,
        )
    }

    /// Requires `property` to equal `value`.
    pub fn exact_match(self, property: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.query_filter("term", json!({ property: value }), FilterClause::Must)
    }

    /// Requires `property > value`.
    pub fn greater_than(self, property: &str, value: impl Into<Value>) -> Self {
        self.range(property, "gt", value.into())
    }

    /// Requires `property >= value`.
    pub fn greater_than_or_equal(self, property: &str, value: impl Into<Value>) -> Self {
        self.range(property, "gte", value.into())
    }

    /// Requires `property < value`.
    pub fn less_than(self, property: &str, value: impl Into<Value>) -> Self {
        self.range(property, "lt", value.into())
    }

    /// Requires `property <= value`.
    pub fn less_than_or_equal(self, property: &str, value: impl Into<Value>) -> Self {
        self.range(property, "lte", value.into())
    }

    fn range(self, property: &str, operator: &str, value: Value) -> Self {
        self.query_filter(
            "range",
            json!({ property: { operator: value } }),
            FilterClause::Must,
        )
    }

    /// Adds a `query_string` clause matching `text`.
    pub fn fulltext(mut self, text: &str) -> Self {
        self.must.push(json!({ "query_string": { "query": text } }));
        self
    }

    /// Adds an arbitrary filter, e.g. `query_filter("terms", json!({"tags": ["a", "b"]}), FilterClause::Must)`.
    pub fn query_filter(mut self, filter_type: &str, options: Value, clause: FilterClause) -> Self {
        let filter = json!({ filter_type: options });
        match clause {
            FilterClause::Must => self.filter_must.push(filter),
            FilterClause::Should => self.filter_should.push(filter),
            FilterClause::MustNot => self.filter_must_not.push(filter),
        }
        self
    }

    /// Sorts ascending by `property`. Repeated calls add tie-breakers.
    pub fn sort_asc(self, property: &str) -> Self {
        self.sort(property, SortOrder::Asc)
    }

    /// Sorts descending by `property`. Repeated calls add tie-breakers.
    pub fn sort_desc(self, property: &str) -> Self {
        self.sort(property, SortOrder::Desc)
    }

    /// Sorts by `property`.
    pub fn sort(mut self, property: &str, order: SortOrder) -> Self {
        self.sort
            .push(json!({ property: { "order": order.as_str() } }));
        self
    }

    /// Caps the number of hits.
    pub fn limit(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Skips the first `from` hits.
    pub fn from(mut self, from: usize) -> Self {
        self.from = Some(from);
        self
    }

    /// Builds the search request body.
    pub fn request(&self) -> Value {
        let mut filter_bool = json!({
            "must": self.filter_must,
            "should": self.filter_should,
            "must_not": self.filter_must_not,
        });
        if !self.filter_should.is_empty() {
            filter_bool["minimum_should_match"] = json!(1);
        }

        let mut body = json!({
            "query": {
                "bool": {
                    "must": self.must,
                    "filter": { "bool": filter_bool },
                }
            },
            "_source": [PATH_FIELD],
        });

        if !self.sort.is_empty() {
            body["sort"] = json!(self.sort);
        }
        if let Some(size) = self.size {
            body["size"] = json!(size);
        }
        if let Some(from) = self.from {
            body["from"] = json!(from);
        }

        body
    }

    /// Builds a count request (no sorting, no source, size=0).
    pub fn count_request(&self) -> Value {
        let mut body = self.request();
        if let Some(obj) = body.as_object_mut() {
            obj.remove("sort");
            obj.remove("from");
            obj.remove("_source");
        }
        body["size"] = json!(0);
        body
    }
}
