//! Health check endpoint.

use axum::{extract::State, Json};
use chrono::Utc;
use pizzeria_types::api::{ActiveConnections, HealthResponse};
use tracing::debug;

use crate::mcp::{handler::SERVER_NAME, TransportKind};
use crate::state::AppState;

/// Health check
///
/// Reports server identity, an ISO-8601 timestamp, and the number of
/// currently open sessions per transport kind.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    debug!("Health check");
    Json(HealthResponse {
        status: "healthy".to_string(),
        server: SERVER_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
        active_connections: ActiveConnections {
            streamable: state.sessions().count(TransportKind::Streamable).await,
            sse: state.sessions().count(TransportKind::Sse).await,
        },
    })
}
