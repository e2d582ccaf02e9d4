use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use flowcell_core::{AppConfig, RunEvent};
use flowcell_exec::{GraphSession, HttpExecutionService};
use flowcell_gateway::GatewayServer;
use flowcell_layout::Direction;

#[derive(Parser)]
#[command(name = "flowcell", version, about = "Graph-native code notebook engine")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "flowcell.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway for a rendering front end
    Serve {
        /// Override the gateway bind address
        #[arg(long)]
        bind: Option<String>,
        /// Override the execution service base URL
        #[arg(long)]
        executor_url: Option<String>,
    },
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flowcell=info,warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        AppConfig::load(&cli.config)?
    } else {
        AppConfig::default()
    };

    let command = cli.command.unwrap_or(Commands::Serve {
        bind: None,
        executor_url: None,
    });

    match command {
        Commands::Serve { bind, executor_url } => {
            if let Some(bind) = bind {
                config.gateway.bind = bind;
            }
            if let Some(url) = executor_url {
                config.executor.base_url = url;
            }
            serve(config).await
        }
        Commands::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let service = Arc::new(HttpExecutionService::new(&config.executor)?);

    // Best-effort probe; the service may come up later.
    if let Err(e) = service.health().await {
        warn!(
            error = %e,
            base_url = %config.executor.base_url,
            "Execution service not reachable yet"
        );
    }

    let direction = Direction::from_config(&config.layout.direction);
    let session = Arc::new(GraphSession::new(service, direction));

    // Surface run lifecycle in the server log.
    let mut events = session.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                RunEvent::Started { node_id } => info!(%node_id, "Run started"),
                RunEvent::Finished { node_id, .. } => info!(%node_id, "Run finished"),
                RunEvent::Failed { node_id, message } => {
                    warn!(%node_id, %message, "Run failed")
                }
            }
        }
    });

    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
            token.cancel();
        }
    });

    let server = GatewayServer::new(config.gateway.clone(), session);
    server.run(shutdown).await
}
