//! MCP JSON-RPC request handler.
//!
//! Dispatches MCP protocol methods to the static tool registry. The handler
//! itself is stateless: session routing happens in the endpoint layer, and
//! the one registered tool is a pure function over static data.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::tools;

/// MCP protocol version we support.
pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// Server name reported to clients.
pub const SERVER_NAME: &str = "pizzeria";

/// JSON-RPC 2.0 Request.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 Response.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// JSON-RPC 2.0 Error.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Tool call parameters from MCP.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
}

/// MCP request handler.
pub struct McpHandler;

impl McpHandler {
    /// Handle an MCP JSON-RPC request.
    ///
    /// Returns `None` for notifications, which need no response.
    pub fn handle_request(request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone();
        debug!("MCP: Handling method: {}", request.method);

        match request.method.as_str() {
            "initialize" => Some(Self::handle_initialize(id)),
            "initialized" | "notifications/initialized" => {
                // Notification, no response needed
                None
            }
            "ping" => Some(JsonRpcResponse::success(id, json!({}))),
            "tools/list" => Some(Self::handle_list_tools(id)),
            "tools/call" => {
                match Self::handle_call_tool(request.params.unwrap_or(json!({}))) {
                    Ok(value) => Some(JsonRpcResponse::success(id, value)),
                    Err(e) => Some(JsonRpcResponse::error(
                        id,
                        -32602,
                        format!("Tool call failed: {}", e),
                    )),
                }
            }
            "notifications/cancelled" => {
                // Client cancelled a request - acknowledge
                None
            }
            _ => Some(JsonRpcResponse::error(
                id,
                -32601,
                format!("Method not found: {}", request.method),
            )),
        }
    }

    /// Handle the initialize request.
    fn handle_initialize(id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    /// Handle the tools/list request.
    fn handle_list_tools(id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(id, json!({ "tools": [tools::descriptor()] }))
    }

    /// Handle a tools/call request.
    fn handle_call_tool(params: Value) -> anyhow::Result<Value> {
        let tool_params: ToolCallParams = serde_json::from_value(params)?;

        if tool_params.name != tools::TOOL_NAME {
            error!("MCP: Unknown tool: {}", tool_params.name);
            return Err(anyhow::anyhow!("Unknown tool: {}", tool_params.name));
        }

        info!("MCP: Serving top pizzas");
        Ok(json!({
            "content": [{
                "type": "text",
                "text": tools::render_top_pizzas()
            }]
        }))
    }
}
