//! Shared fixtures for adaptor integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use crsearch_adaptor::driver::{SearchClient, SearchRequest, SearchResponse};
use crsearch_adaptor::error::DriverError;
use crsearch_repository::{MemoryNode, NodeTypeDefinition, NodeTypeManager};

/// Node types of a small product catalog.
pub fn catalog_types() -> NodeTypeManager {
    let types = NodeTypeManager::new();
    types
        .register_all([
            NodeTypeDefinition::new("Base:Node").as_abstract(),
            NodeTypeDefinition::new("Base:Document").with_super_type("Base:Node"),
            NodeTypeDefinition::new("Base:Taggable").with_super_type("Base:Node"),
            NodeTypeDefinition::new("Site:Product")
                .with_super_type("Base:Document")
                .with_super_type("Base:Taggable"),
            NodeTypeDefinition::new("Site:Folder").with_super_type("Base:Document"),
            NodeTypeDefinition::new("Site:Tag"),
            NodeTypeDefinition::new("Site:Text"),
        ])
        .expect("catalog types register");
    types
}

/// A tag folder with two tags and one unrelated text node.
pub fn tag_folder(types: &NodeTypeManager) -> MemoryNode {
    let node_type = |name: &str| types.get(name).expect("type is registered");
    let tag = |id: &str, title: &str| {
        MemoryNode::new(id, format!("/sites/demo/tags/{}", id), node_type("Site:Tag"))
            .with_property("title", json!(title))
    };

    MemoryNode::new("folder", "/sites/demo/tags", node_type("Site:Folder"))
        .with_property("title", json!("Tools"))
        .with_child(tag("t1", "Bohren"))
        .with_child(MemoryNode::new(
            "x1",
            "/sites/demo/tags/x1",
            node_type("Site:Text"),
        ))
        .with_child(tag("t2", "Handrad"))
}

/// A client answering from a queue of canned responses.
#[derive(Default)]
pub struct ScriptedClient {
    requests: Mutex<Vec<SearchRequest>>,
    responses: Mutex<VecDeque<Result<SearchResponse, DriverError>>>,
}

impl ScriptedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: Value) {
        self.responses
            .lock()
            .push_back(Ok(SearchResponse { status, body }));
    }

    pub fn fail(&self, error: DriverError) {
        self.responses.lock().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl SearchClient for ScriptedClient {
    async fn send(&self, request: SearchRequest) -> Result<SearchResponse, DriverError> {
        self.requests.lock().push(request);
        self.responses.lock().pop_front().unwrap_or(Ok(SearchResponse {
            status: 200,
            body: Value::Null,
        }))
    }
}
