use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowcellError {
    // Graph store invariant violations
    #[error("Node id already exists: {0}")]
    DuplicateId(String),

    #[error("Edge {edge} references missing node: {missing}")]
    DanglingReference { edge: String, missing: String },

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    // Execution errors
    #[error("Execution request failed: {0}")]
    ExecRequest(String),

    #[error("Execution response parse error: {0}")]
    ExecParse(String),

    // Config errors
    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlowcellError>;
