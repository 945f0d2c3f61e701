//! OpenAPI documentation configuration.

use pizzeria_types::api::{
    ActiveConnections, Capabilities, EndpointMap, HealthResponse, ServerInfoResponse,
    ToolCapability,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(crate::api::health::health, crate::api::info::server_info,),
    components(
        schemas(
            HealthResponse,
            ActiveConnections,
            ServerInfoResponse,
            EndpointMap,
            Capabilities,
            ToolCapability,
        )
    ),
    tags(
        (name = "System", description = "Service health and discovery endpoints")
    ),
    info(
        title = "Pizzeria MCP Server API",
        description = "Demo MCP server exposing one static tool over Streamable HTTP and legacy SSE transports"
    )
)]
pub struct ApiDoc;
