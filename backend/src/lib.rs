//! Pizzeria backend library.
//!
//! This module exposes the application builder for use in tests.

use axum::http::{header, HeaderName, Method};
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod api;
pub mod config;
pub mod mcp;
pub mod openapi;
pub mod state;

use state::AppState;

/// Create the Axum application router.
///
/// This function is used both by the main server binary and by integration tests.
pub fn create_app() -> Router {
    create_app_with_state(AppState::new())
}

/// Create the Axum application router with a given state.
pub fn create_app_with_state(state: AppState) -> Router {
    // Permissive CORS for browser-based MCP clients; preflight requests are
    // answered by the layer before they reach the router.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("mcp-session-id"),
        ])
        .expose_headers([HeaderName::from_static("mcp-session-id")]);

    Router::new()
        .route("/", get(api::info::server_info))
        .route("/health", get(api::health::health))
        // MCP Streamable HTTP endpoint (has its own session management)
        .route("/mcp", post(api::mcp::mcp_post))
        .route("/mcp", get(api::mcp::mcp_get))
        .route("/mcp", delete(api::mcp::mcp_delete))
        // Legacy SSE transport
        .route("/sse", get(api::sse::sse_connect))
        .route("/messages", post(api::sse::post_message))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
        .layer(cors)
        .with_state(state)
}
