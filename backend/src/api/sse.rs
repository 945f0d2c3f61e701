//! Legacy SSE transport endpoints.
//!
//! Implements the HTTP+SSE transport that predates Streamable HTTP: the
//! client opens a long-lived event stream on `GET /sse` and posts its
//! JSON-RPC messages to `POST /messages?sessionId=<id>`. Responses travel
//! back over the event stream, never in the POST reply.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::stream;
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tracing::{debug, error, info};

use crate::mcp::{
    handler::{JsonRpcRequest, McpHandler},
    session::{McpEvent, SessionStore, TransportKind},
};
use crate::state::AppState;

/// Removes a session from the store when its event stream is dropped.
///
/// The guard rides inside the stream closure, so the client disconnecting
/// (or the server dropping the response) is what triggers removal.
struct SseCloseGuard {
    sessions: SessionStore,
    session_id: String,
}

impl Drop for SseCloseGuard {
    fn drop(&mut self) {
        let sessions = self.sessions.clone();
        let session_id = std::mem::take(&mut self.session_id);
        tokio::spawn(async move {
            sessions.remove(&session_id, TransportKind::Sse).await;
        });
    }
}

/// GET /sse - Open a legacy SSE transport connection.
///
/// The server generates the session id and announces it in the stream's
/// first event (`endpoint`), which tells the client where to post its
/// messages. JSON-RPC traffic follows as `message` events.
pub async fn sse_connect(State(state): State<AppState>) -> Response {
    let session_id = state.sessions().create(TransportKind::Sse).await;

    let rx = match state
        .sessions()
        .subscribe(&session_id, TransportKind::Sse)
        .await
    {
        Some(rx) => rx,
        None => {
            error!("SSE: session {} vanished before stream opened", session_id);
            return super::mcp::internal_error_response();
        }
    };

    info!("New SSE session initialized: {}", session_id);

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("/messages?sessionId={}", session_id));

    let guard = SseCloseGuard {
        sessions: state.sessions().clone(),
        session_id,
    };

    let messages = BroadcastStream::new(rx).filter_map(move |result| {
        // Keeps the close guard alive for the lifetime of the stream.
        let _ = &guard;
        match result {
            Ok(McpEvent::JsonRpc(json)) => {
                Some(Ok::<_, Infallible>(Event::default().event("message").data(json)))
            }
            Err(_) => None, // Lagged or closed
        }
    });

    let stream = stream::once(async move { Ok::<_, Infallible>(endpoint) }).chain(messages);

    Sse::new(stream)
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
        .into_response()
}

/// Query parameters for the legacy message endpoint.
#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

/// POST /messages - Deliver a client message for an existing SSE session.
///
/// The JSON-RPC response, if any, is pushed onto the session's event stream;
/// the POST itself only acknowledges receipt. An unknown or missing id is a
/// client error, not a silent drop.
pub async fn post_message(
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    let Some(session_id) = query.session_id else {
        return no_transport_response();
    };

    debug!("SSE message received for session: {}", session_id);

    if !state.sessions().exists(&session_id, TransportKind::Sse).await {
        info!("No transport found for sessionId: {}", session_id);
        return no_transport_response();
    }

    if let Some(response) = McpHandler::handle_request(request) {
        let body = match serde_json::to_string(&response) {
            Ok(body) => body,
            Err(e) => {
                error!("SSE: Failed to serialize response: {}", e);
                return super::mcp::internal_error_response();
            }
        };
        // A race with disconnect only means no subscriber is left to read it.
        state
            .sessions()
            .send(&session_id, TransportKind::Sse, McpEvent::JsonRpc(body))
            .await;
    }

    (StatusCode::ACCEPTED, "Accepted").into_response()
}

/// HTTP 400 body for an unknown or missing `sessionId`.
fn no_transport_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "jsonrpc": "2.0",
            "error": { "code": -32000, "message": "No transport found for sessionId" },
            "id": null
        })),
    )
        .into_response()
}
