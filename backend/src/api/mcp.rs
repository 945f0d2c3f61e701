//! MCP Streamable HTTP endpoint handlers.
//!
//! Implements the MCP 2025-03-26 Streamable HTTP transport specification.
//!
//! ## Endpoints
//!
//! - `POST /mcp` - Send JSON-RPC requests
//! - `GET /mcp` - Open SSE stream for server-initiated messages
//! - `DELETE /mcp` - Terminate a session
//!
//! The `Mcp-Session-Id` header is assigned on initialize and routes
//! subsequent requests to the same session until it is terminated.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tracing::{debug, error, info};

use crate::mcp::{
    handler::{JsonRpcRequest, JsonRpcResponse, McpHandler},
    session::{McpEvent, TransportKind},
};
use crate::state::AppState;

/// Header name for MCP session ID.
pub const MCP_SESSION_ID_HEADER: &str = "mcp-session-id";

/// Extract session ID from headers.
fn get_session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(MCP_SESSION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Build the HTTP 500 response used when request handling fails before any
/// bytes have been sent.
pub(crate) fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "jsonrpc": "2.0",
            "error": { "code": -32603, "message": "Internal server error" },
            "id": null
        })),
    )
        .into_response()
}

/// Serialize a JSON-RPC response, attaching the session id header when one
/// is in play.
fn json_rpc_response(response: &JsonRpcResponse, session_id: Option<&str>) -> Response {
    let body = match serde_json::to_string(response) {
        Ok(body) => body,
        Err(e) => {
            error!("MCP: Failed to serialize response: {}", e);
            return internal_error_response();
        }
    };

    let mut resp = (StatusCode::OK, body).into_response();
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    if let Some(sid) = session_id {
        if let Ok(hv) = HeaderValue::from_str(sid) {
            resp.headers_mut()
                .insert(HeaderName::from_static(MCP_SESSION_ID_HEADER), hv);
        }
    }
    resp
}

/// POST /mcp - Handle JSON-RPC requests.
///
/// `initialize` always creates a fresh session and returns its id in the
/// `Mcp-Session-Id` response header. Other requests carrying a recognized id
/// are served in that session's context; a stale id reads as not-found.
pub async fn mcp_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    let session_id = get_session_id(&headers);
    debug!(
        "MCP POST: method={}, session={:?}",
        request.method, session_id
    );

    // Initialize creates the session. Ids are server-generated: a supplied id
    // that is not in the store is ignored rather than resurrected.
    if request.method == "initialize" {
        let new_session_id = state.sessions().create(TransportKind::Streamable).await;
        info!("MCP: New streamable session initialized: {}", new_session_id);

        return match McpHandler::handle_request(request) {
            Some(response) => json_rpc_response(&response, Some(&new_session_id)),
            None => StatusCode::ACCEPTED.into_response(),
        };
    }

    // For other methods, a supplied session id must reference a live session.
    if let Some(ref sid) = session_id {
        if !state.sessions().exists(sid, TransportKind::Streamable).await {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "jsonrpc": "2.0",
                    "error": { "code": -32001, "message": "Session not found" },
                    "id": null
                })),
            )
                .into_response();
        }
    }
    // Note: requests without a session id are served statelessly to allow
    // simpler clients.

    match McpHandler::handle_request(request) {
        Some(response) => json_rpc_response(&response, session_id.as_deref()),
        // Notification - no response needed
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// GET /mcp - Open SSE stream for server-initiated messages.
///
/// Dropping the stream does not terminate the session; only `DELETE` or
/// process shutdown does.
pub async fn mcp_get(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session_id = match get_session_id(&headers) {
        Some(id) => id,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Mcp-Session-Id header required for SSE stream"})),
            )
                .into_response();
        }
    };

    let rx = match state
        .sessions()
        .subscribe(&session_id, TransportKind::Streamable)
        .await
    {
        Some(rx) => rx,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Session not found"})),
            )
                .into_response();
        }
    };

    info!("MCP: SSE stream opened for session {}", session_id);

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(McpEvent::JsonRpc(json)) => Some(Ok::<_, Infallible>(Event::default().data(json))),
        Err(_) => None, // Lagged or closed
    });

    Sse::new(stream)
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
        .into_response()
}

/// DELETE /mcp - Terminate a session.
///
/// Terminates the session identified by the `Mcp-Session-Id` header.
pub async fn mcp_delete(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session_id = match get_session_id(&headers) {
        Some(id) => id,
        None => return StatusCode::BAD_REQUEST.into_response(),
    };

    if state
        .sessions()
        .remove(&session_id, TransportKind::Streamable)
        .await
    {
        info!("MCP: Session terminated: {}", session_id);
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
