//! Shared types for the Pizzeria demo MCP server.
//!
//! This crate contains the static pizza reference data and the API response
//! types shared between the backend and its integration tests.

/// Default port for the Pizzeria server.
pub const DEFAULT_PORT: u16 = 8084;

pub mod api;
pub mod pizza;

// Re-export commonly used types
pub use api::{
    ActiveConnections, Capabilities, EndpointMap, HealthResponse, ServerInfoResponse,
    ToolCapability,
};
pub use pizza::{Pizza, TOP_PIZZAS};
