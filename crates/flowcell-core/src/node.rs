use serde::{Deserialize, Serialize};

/// Canvas position of a node's top-left corner, in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This position shifted by a fixed delta.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The editable content of a node cell.
///
/// `code` is owned by the user (editor keystrokes land here); `output` is
/// owned by the run dispatcher. Render-side callback bindings are transient
/// UI state and never enter the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePayload {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub output: String,
}

/// A partial payload update. Only the supplied fields are overwritten;
/// updating `code` never erases `output` and vice versa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodePatch {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
}

impl NodePatch {
    pub fn code(text: impl Into<String>) -> Self {
        Self {
            code: Some(text.into()),
            output: None,
        }
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self {
            code: None,
            output: Some(text.into()),
        }
    }
}

/// A code cell in the graph.
///
/// The id is immutable once created and doubles as the cell's display label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub position: Position,
    #[serde(default)]
    pub payload: NodePayload,
}

impl Node {
    /// Create a node with empty code and output.
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            payload: NodePayload::default(),
        }
    }

    /// Set the initial code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.payload.code = code.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = Node::new("A", Position::new(50.0, 20.0)).with_code("x = 1");
        assert_eq!(node.id, "A");
        assert_eq!(node.position, Position::new(50.0, 20.0));
        assert_eq!(node.payload.code, "x = 1");
        assert_eq!(node.payload.output, "");
    }

    #[test]
    fn test_position_offset() {
        let p = Position::new(50.0, 20.0).offset(300.0, 140.0);
        assert_eq!(p, Position::new(350.0, 160.0));
    }

    #[test]
    fn test_patch_constructors() {
        let patch = NodePatch::output("done");
        assert!(patch.code.is_none());
        assert_eq!(patch.output.as_deref(), Some("done"));
    }
}
