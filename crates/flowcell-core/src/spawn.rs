use tracing::info;

use crate::edge::Edge;
use crate::error::{FlowcellError, Result};
use crate::id::short_id;
use crate::node::Node;
use crate::store::GraphStore;

/// Horizontal offset of a spawned child from its parent.
pub const CHILD_OFFSET_X: f64 = 300.0;
/// Vertical offset of a spawned child from its parent.
pub const CHILD_OFFSET_Y: f64 = 140.0;

/// Default code for a freshly spawned child cell. The new id is embedded so
/// the cell's first run identifies itself in its own output.
fn child_code(id: &str) -> String {
    format!("print(\"child {}\", x)", id)
}

/// Allocate a child cell under `parent_id`: a fresh node offset from the
/// parent plus the connecting edge, committed together.
///
/// The node lands at parent + (300, 140) so it never renders on top of its
/// parent. Returns clones of the committed node and edge. Fails with
/// `NodeNotFound` before touching the store if the parent is absent; after
/// the existence check neither insert can fail, so a partial commit is
/// never observable.
pub fn spawn_child(store: &mut GraphStore, parent_id: &str) -> Result<(Node, Edge)> {
    let parent = store
        .node(parent_id)
        .ok_or_else(|| FlowcellError::NodeNotFound(parent_id.to_string()))?;

    let id = short_id();
    let position = parent.position.offset(CHILD_OFFSET_X, CHILD_OFFSET_Y);
    let node = Node::new(&id, position).with_code(child_code(&id));
    let edge = Edge::between(parent_id, &id);

    store.add_node(node.clone())?;
    store.add_edge(edge.clone())?;

    info!(parent_id, child_id = %id, "Spawned child cell");
    Ok((node, edge))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Position;

    #[test]
    fn test_spawn_offsets_from_parent() {
        let mut store = GraphStore::seeded();
        let (node, edge) = spawn_child(&mut store, "A").unwrap();

        let parent = store.node("A").unwrap();
        assert_eq!(node.position.x, parent.position.x + 300.0);
        assert_eq!(node.position.y, parent.position.y + 140.0);
        assert_eq!(edge.source, "A");
        assert_eq!(edge.target, node.id);
        assert_eq!(edge.id, format!("e-A-{}", node.id));
    }

    #[test]
    fn test_spawned_child_code_and_output() {
        let mut store = GraphStore::seeded();
        let (node, _) = spawn_child(&mut store, "A").unwrap();

        assert_eq!(node.id.len(), 6);
        assert!(node.payload.code.contains(&node.id));
        assert_eq!(node.payload.output, "");
    }

    #[test]
    fn test_spawn_commits_both_or_neither() {
        let mut store = GraphStore::seeded();

        let err = spawn_child(&mut store, "MISSING").unwrap_err();
        assert!(matches!(err, FlowcellError::NodeNotFound(_)));
        assert_eq!(store.nodes().len(), 1);
        assert!(store.edges().is_empty());

        spawn_child(&mut store, "A").unwrap();
        assert_eq!(store.nodes().len(), 2);
        assert_eq!(store.edges().len(), 1);
    }

    #[test]
    fn test_spawn_chain() {
        let mut store = GraphStore::seeded();
        store.move_node("A", Position::new(0.0, 0.0)).unwrap();

        let (child, _) = spawn_child(&mut store, "A").unwrap();
        let (grandchild, _) = spawn_child(&mut store, &child.id).unwrap();

        assert_eq!(grandchild.position, Position::new(600.0, 280.0));
        assert_eq!(store.nodes().len(), 3);
        assert_eq!(store.edges().len(), 2);
    }
}
