use serde::{Deserialize, Serialize};

/// A directed connection between two nodes.
///
/// The id is derived from the endpoints (`e-<source>-<target>`), so the same
/// pair always produces the same edge id. Nothing forbids several edges
/// sharing a target; which one counts as the parent is the resolver's call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    /// Create an edge with the canonical derived id.
    pub fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("e-{}-{}", source, target),
            source,
            target,
        }
    }
}

/// Resolve the logical parent of a node from the edge set.
///
/// Scans edges in insertion order and returns the source of the first edge
/// targeting `node_id`, or `None` when nothing feeds it. When a node has
/// several incoming edges the first-inserted one wins — a deliberate policy,
/// not an accident of iteration order.
pub fn resolve_parent<'a>(node_id: &str, edges: &'a [Edge]) -> Option<&'a str> {
    edges
        .iter()
        .find(|e| e.target == node_id)
        .map(|e| e.source.as_str())
}
