use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::info;

use flowcell_core::config::GatewayConfig;
use flowcell_exec::GraphSession;

use crate::routes;
use crate::state::AppState;

/// HTTP gateway built on axum.
///
/// The rendering front end polls `/api/graph` and posts gestures to
/// `/api/command`; CORS is permissive because the canvas is served from its
/// own dev server.
pub struct GatewayServer {
    config: GatewayConfig,
    session: Arc<GraphSession>,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig, session: Arc<GraphSession>) -> Self {
        Self { config, session }
    }

    /// Run the gateway server until the cancellation token is triggered.
    pub async fn run(&self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let state = Arc::new(AppState {
            session: self.session.clone(),
        });

        let app = Router::new()
            .route("/api/health", get(routes::health))
            .route("/api/graph", get(routes::graph))
            .route("/api/command", post(routes::command))
            .layer(CorsLayer::permissive())
            .with_state(state);

        let listener = TcpListener::bind(&self.config.bind).await?;
        info!(bind = %self.config.bind, "Gateway listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        info!("Gateway shut down");
        Ok(())
    }
}
