//! Server entry point for the Lineage API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use lineage_api::{build_router, AppState};
use lineage_core::config::Neo4jConfig;
use lineage_core::AppConfig;
use lineage_graph::{GraphClient, GraphConfig};
use lineage_query::RateLimiter;

#[derive(Parser)]
#[command(name = "lineage-api")]
#[command(about = "Read-mostly HTTP API over the Lineage family graph")]
struct Cli {
    /// Config file prefix (default: lineage).
    #[arg(short, long, default_value = "lineage")]
    config: String,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let graph = GraphClient::connect(&graph_config(&config.neo4j)).await?;

    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit.max_requests,
        Duration::from_secs(config.rate_limit.window_secs),
    ));
    limiter
        .clone()
        .spawn_sweeper(Duration::from_secs(config.rate_limit.sweep_interval_secs));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = build_router(AppState {
        config,
        graph,
        limiter,
    });

    tracing::info!(%addr, "Lineage API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn graph_config(neo4j: &Neo4jConfig) -> GraphConfig {
    GraphConfig {
        uri: neo4j.uri.clone(),
        user: neo4j.user.clone(),
        password: neo4j.password.clone(),
        read_only_user: neo4j.read_only_user.clone(),
        read_only_password: neo4j.read_only_password.clone(),
        database: neo4j.database.clone(),
        max_connections: neo4j.max_connections,
        fetch_size: neo4j.fetch_size,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping");
}
