use std::sync::Arc;

use flowcell_exec::GraphSession;

/// Shared application state for axum handlers.
pub struct AppState {
    pub session: Arc<GraphSession>,
}
