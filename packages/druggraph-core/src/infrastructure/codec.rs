// Graph Codec - JSON persistence
//
// Document layout:
// {
//   "id_state": 5,
//   "nodes": [ {"type": "drug", "id": 0, "name": "..."}, ... ],
//   "links": [ {"type": "published_link", "id": 3, ...}, ... ]
// }
//
// Nodes and links are written in id order. Reading rebuilds the graph through
// insert_node / insert_link, so the journal lookup comes back and every
// invariant is re-checked.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::{EntityId, Graph, IdAllocator, Link, Node};
use crate::error::{GraphError, Result};

#[derive(Serialize)]
struct GraphDocumentRef<'a> {
    id_state: EntityId,
    nodes: Vec<&'a Node>,
    links: Vec<&'a Link>,
}

#[derive(Deserialize)]
struct GraphDocument {
    id_state: EntityId,
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl Graph {
    fn as_document(&self) -> GraphDocumentRef<'_> {
        GraphDocumentRef {
            id_state: self.id_state(),
            nodes: self.nodes().collect(),
            links: self.links().collect(),
        }
    }

    fn from_document(doc: GraphDocument) -> Result<Self> {
        // The counter must be able to hand out at least one more id
        if doc.id_state == EntityId::MAX {
            return Err(GraphError::decode(format!(
                "id_state {} leaves no id to allocate",
                doc.id_state
            )));
        }
        let mut graph = Graph::new();
        graph.ids = IdAllocator::resume(doc.id_state);

        for node in doc.nodes {
            check_below_state(node.id(), doc.id_state)?;
            graph.insert_node(node)?;
        }
        // Links after all nodes: endpoints may have any id
        for link in doc.links {
            check_below_state(link.id(), doc.id_state)?;
            graph.insert_link(link)?;
        }
        Ok(graph)
    }

    /// Graph as a JSON value
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.as_document())?)
    }

    /// Rebuild a graph from a JSON value produced by [`Graph::to_value`]
    pub fn from_value(value: Value) -> Result<Self> {
        let doc: GraphDocument = serde_json::from_value(value)?;
        Self::from_document(doc)
    }

    /// Pretty-printed JSON text
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.as_document())?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let doc: GraphDocument = serde_json::from_str(text)?;
        Self::from_document(doc)
    }

    /// Write the graph to `path`, creating parent directories
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                GraphError::io(format!("cannot create {}", parent.display())).with_source(e)
            })?;
        }
        let text = self.to_json()?;
        fs::write(path, text).map_err(|e| {
            GraphError::io(format!("cannot write {}", path.display())).with_source(e)
        })?;
        info!(
            "graph saved to {} ({} nodes, {} links)",
            path.display(),
            self.node_count(),
            self.link_count()
        );
        Ok(())
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            GraphError::io(format!("cannot read {}", path.display())).with_source(e)
        })?;
        let graph = Self::from_json(&text)?;
        debug!(
            "graph loaded from {} ({} nodes, {} links)",
            path.display(),
            graph.node_count(),
            graph.link_count()
        );
        Ok(graph)
    }
}

fn check_below_state(id: EntityId, id_state: EntityId) -> Result<()> {
    if id >= id_state {
        return Err(GraphError::decode(format!(
            "id {} is not below id_state {}",
            id, id_state
        )));
    }
    Ok(())
}
