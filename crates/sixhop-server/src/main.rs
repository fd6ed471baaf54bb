//! sixhop server binary.

use axum::Router;
use clap::Parser;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sixhop_core::{EngineConfig, PathService};
use sixhop_server::{api_router, AppState};

/// sixhop social-graph pathfinding server.
#[derive(Parser, Debug)]
#[command(name = "sixhop-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "sixhop.toml", env = "SIXHOP_CONFIG")]
    config: String,

    /// Host address to bind to (overrides configuration)
    #[arg(long, env = "SIXHOP_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides configuration)
    #[arg(short, long, env = "SIXHOP_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = EngineConfig::load_from_path(&args.config)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    tracing::info!(
        shards = config.graph.num_shards,
        cache_max_size = config.cache.max_size,
        max_depth = config.search.max_depth,
        "starting sixhop server"
    );

    let service = PathService::from_config(&config);
    let state = Arc::new(AppState { service });

    let mut app: Router = api_router(state).layer(TraceLayer::new_for_http());
    if config.server.cors_enabled {
        app = app.layer(CorsLayer::permissive());
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("sixhop server listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
