//! Service info endpoint.

use axum::Json;
use pizzeria_types::api::{Capabilities, EndpointMap, ServerInfoResponse, ToolCapability};

use crate::mcp::handler::SERVER_NAME;
use crate::mcp::tools;

/// Service info
///
/// Describes the available endpoints and the advertised tool capability.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    responses(
        (status = 200, description = "Service description", body = ServerInfoResponse)
    )
)]
pub async fn server_info() -> Json<ServerInfoResponse> {
    Json(ServerInfoResponse {
        name: SERVER_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Simple demo server showcasing the top 5 pizzas in the world".to_string(),
        endpoints: EndpointMap {
            mcp: "/mcp (Streamable HTTP - GET/POST/DELETE)".to_string(),
            sse: "/sse (Legacy SSE - GET)".to_string(),
            messages: "/messages (Legacy SSE Messages - POST)".to_string(),
            health: "/health".to_string(),
            info: "/".to_string(),
        },
        capabilities: Capabilities {
            tools: vec![ToolCapability {
                name: tools::TOOL_NAME.to_string(),
                description: tools::TOOL_DESCRIPTION.to_string(),
            }],
        },
    })
}
