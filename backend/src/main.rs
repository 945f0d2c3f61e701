//! Pizzeria backend server.

use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use pizzeria::{config::Config, create_app_with_state, state::AppState};

/// Pizzeria - demo MCP server for the top 5 pizzas in the world
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides PORT and the config file)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::from_figment(args.port)?;

    // Initialize logging - use RUST_LOG env var, then the config file, default to info
    let default_level = config
        .log_level
        .clone()
        .unwrap_or_else(|| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .compact()
        .init();

    info!("Starting Pizzeria MCP server...");

    let state = AppState::new();
    let sessions = state.sessions().clone();
    let app = create_app_with_state(state);

    // Bind to 0.0.0.0 to be accessible from all interfaces (Docker, network, etc.)
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("  Streamable HTTP: http://localhost:{}/mcp", config.port);
    info!("  Legacy SSE:      http://localhost:{}/sse", config.port);
    info!("  Health check:    http://localhost:{}/health", config.port);

    // Set up graceful shutdown handler
    let shutdown_signal = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down gracefully...");

        // Best-effort close of every open session before the server drains.
        sessions.shutdown_all().await;

        info!("Server shutting down");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}
