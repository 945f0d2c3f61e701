//! API response types for the HTTP endpoints.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// ============================================================================
// Health API Types
// ============================================================================

/// Count of currently open sessions per transport kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ActiveConnections {
    pub streamable: usize,
    pub sse: usize,
}

/// Response for the health check endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthResponse {
    pub status: String,
    pub server: String,
    pub version: String,
    /// ISO-8601 timestamp of the health check.
    pub timestamp: String,
    pub active_connections: ActiveConnections,
}

// ============================================================================
// Service Info API Types
// ============================================================================

/// Endpoint map advertised by the service info endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EndpointMap {
    pub mcp: String,
    pub sse: String,
    pub messages: String,
    pub health: String,
    pub info: String,
}

/// A single advertised tool capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ToolCapability {
    pub name: String,
    pub description: String,
}

/// Capabilities advertised by the service info endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Capabilities {
    pub tools: Vec<ToolCapability>,
}

/// Response for the service info endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ServerInfoResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: EndpointMap,
    pub capabilities: Capabilities,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_uses_camel_case() {
        let health = HealthResponse {
            status: "healthy".to_string(),
            server: "pizzeria".to_string(),
            version: "0.1.0".to_string(),
            timestamp: "2026-01-01T00:00:00Z".to_string(),
            active_connections: ActiveConnections {
                streamable: 1,
                sse: 0,
            },
        };

        let value = serde_json::to_value(&health).unwrap();
        assert_eq!(value["activeConnections"]["streamable"], 1);
        assert_eq!(value["activeConnections"]["sse"], 0);
    }
}
