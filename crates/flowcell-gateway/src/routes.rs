use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use flowcell_core::{Command, FlowcellError};
use flowcell_exec::CommandEffect;

use crate::state::AppState;

// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// GET /api/graph — current snapshot for the canvas
pub async fn graph(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let snapshot = state.session.snapshot();
    Json(serde_json::json!({
        "nodes": snapshot.nodes,
        "edges": snapshot.edges,
    }))
}

// POST /api/command — one canvas gesture as a typed command
pub async fn command(
    State(state): State<Arc<AppState>>,
    Json(command): Json<Command>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    debug!(?command, "Handling command");

    match state.session.handle(command) {
        Ok(CommandEffect::Mutated) => Ok(Json(serde_json::json!({ "ok": true }))),
        Ok(CommandEffect::Spawned { node, edge }) => Ok(Json(serde_json::json!({
            "ok": true,
            "node": node,
            "edge": edge,
        }))),
        Ok(CommandEffect::Dispatched(handle)) => Ok(Json(serde_json::json!({
            "ok": true,
            "running": handle.node_id,
        }))),
        // Invariant violations are caller bugs: bad node references from a
        // stale canvas map to 404/409 rather than tearing the session down.
        Err(FlowcellError::NodeNotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(FlowcellError::DuplicateId(_)) => Err(StatusCode::CONFLICT),
        Err(FlowcellError::DanglingReference { .. }) => Err(StatusCode::UNPROCESSABLE_ENTITY),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
