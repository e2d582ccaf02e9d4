use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::edge::Edge;
use crate::error::{FlowcellError, Result};
use crate::node::{Node, NodePatch, Position};

/// Code seeded into the initial cell.
pub const SEED_CODE: &str = "x = 1\nprint('A, x =', x)";

/// An immutable view of the graph for read-only consumers (layout,
/// rendering, run dispatch). Cloned out of the store, so it can never drift
/// under a concurrent mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// The authoritative owner of all node and edge records.
///
/// Nodes and edges live in insertion order — the order matters for parent
/// resolution and stable rendering, not for graph semantics. All mutation
/// goes through the operations below; every one either commits fully or
/// leaves the store untouched. No caller ever gets a mutable reference into
/// the internals.
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    node_index: HashMap<String, usize>,
    edges: Vec<Edge>,
    edge_ids: HashSet<String>,
}

impl GraphStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with the standard seed cell `A` and no edges.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        let seed = Node::new("A", Position::new(50.0, 20.0)).with_code(SEED_CODE);
        store.node_index.insert(seed.id.clone(), 0);
        store.nodes.push(seed);
        store
    }

    /// Append a new node. Fails if the id is already taken.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.node_index.contains_key(&node.id) {
            return Err(FlowcellError::DuplicateId(node.id));
        }
        debug!(node_id = %node.id, "Adding node");
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Append a new edge. Both endpoints must already exist.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        if self.edge_ids.contains(&edge.id) {
            return Err(FlowcellError::DuplicateId(edge.id));
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.node_index.contains_key(endpoint) {
                return Err(FlowcellError::DanglingReference {
                    edge: edge.id.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
        debug!(edge_id = %edge.id, "Adding edge");
        self.edge_ids.insert(edge.id.clone());
        self.edges.push(edge);
        Ok(())
    }

    /// Shallow-merge a patch into a node's payload. Position and any field
    /// the patch leaves unset are untouched.
    pub fn patch_node(&mut self, id: &str, patch: NodePatch) -> Result<()> {
        let node = self.node_mut(id)?;
        if let Some(code) = patch.code {
            node.payload.code = code;
        }
        if let Some(output) = patch.output {
            node.payload.output = output;
        }
        Ok(())
    }

    /// Overwrite a node's position, leaving the payload alone.
    pub fn move_node(&mut self, id: &str, position: Position) -> Result<()> {
        self.node_mut(id)?.position = position;
        Ok(())
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Clone out the current graph for read-only consumers. Every mutation
    /// committed before this call is visible in the snapshot.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node> {
        match self.node_index.get(id) {
            Some(&i) => Ok(&mut self.nodes[i]),
            None => Err(FlowcellError::NodeNotFound(id.to_string())),
        }
    }
}
