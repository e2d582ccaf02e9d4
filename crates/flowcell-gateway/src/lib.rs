mod routes;
mod server;
mod state;

pub use server::GatewayServer;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::Json;
    use futures::future::BoxFuture;

    use flowcell_core::{Command, Result};
    use flowcell_exec::{ExecuteRequest, ExecuteResponse, ExecutionService, GraphSession};
    use flowcell_layout::Direction;

    use crate::routes;
    use crate::state::AppState;

    struct NullService;

    impl ExecutionService for NullService {
        fn execute(&self, _request: ExecuteRequest) -> BoxFuture<'_, Result<ExecuteResponse>> {
            Box::pin(async { Ok(ExecuteResponse::default()) })
        }
    }

    fn app_state() -> Arc<AppState> {
        Arc::new(AppState {
            session: Arc::new(GraphSession::new(
                Arc::new(NullService),
                Direction::TopBottom,
            )),
        })
    }

    #[tokio::test]
    async fn test_health_route() {
        let Json(body) = routes::health().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_graph_route_returns_seed() {
        let Json(body) = routes::graph(State(app_state())).await;
        assert_eq!(body["nodes"].as_array().unwrap().len(), 1);
        assert_eq!(body["nodes"][0]["id"], "A");
        assert!(body["edges"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_command_route_add_child() {
        let state = app_state();
        let Json(body) = routes::command(
            State(state.clone()),
            Json(Command::AddChild { id: "A".into() }),
        )
        .await
        .unwrap();

        assert_eq!(body["ok"], true);
        assert_eq!(body["edge"]["source"], "A");

        let Json(graph) = routes::graph(State(state)).await;
        assert_eq!(graph["nodes"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_command_route_unknown_node_is_404() {
        let err = routes::command(
            State(app_state()),
            Json(Command::Run { id: "GHOST".into() }),
        )
        .await
        .unwrap_err();
        assert_eq!(err, StatusCode::NOT_FOUND);
    }
}
