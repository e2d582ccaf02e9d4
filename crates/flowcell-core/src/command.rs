use serde::{Deserialize, Serialize};

use crate::node::Position;

/// A gesture from the rendering collaborator, expressed as data.
///
/// The canvas emits these instead of holding callbacks into the core: one
/// command per UI gesture, consumed through a single dispatch entry point
/// (`GraphSession::handle`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// The user drew a connection between two nodes.
    Connect { source: String, target: String },
    /// A node drag ended at a new position.
    Move { id: String, position: Position },
    /// The editor produced a new code text for a node.
    EditCode { id: String, code: String },
    /// The user clicked a node's run button.
    Run { id: String },
    /// The user clicked a node's add-child button.
    AddChild { id: String },
    /// The user asked for an automatic re-layout of the whole graph.
    AutoLayout,
}
