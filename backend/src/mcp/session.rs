//! MCP session management.
//!
//! Tracks session lifecycle for both MCP transports. Each transport kind has
//! its own map, so ids never collide across transports, and the store holds
//! the only strong reference to a session: removing the entry releases it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// Events that can be sent to MCP clients via SSE.
#[derive(Clone, Debug)]
pub enum McpEvent {
    /// A JSON-RPC message to send to the client.
    JsonRpc(String),
}

/// Which wire transport a session belongs to.
///
/// The two kinds are independent namespaces: a streamable id is never valid
/// on the legacy SSE endpoints and vice versa.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportKind {
    /// Streamable HTTP (`/mcp`), sessions keyed by the `Mcp-Session-Id` header.
    Streamable,
    /// Legacy SSE (`/sse` + `/messages`), sessions keyed by the `sessionId`
    /// query parameter.
    Sse,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Streamable => "streamable",
            TransportKind::Sse => "sse",
        }
    }
}

/// An MCP session.
#[derive(Debug)]
pub struct McpSession {
    /// Unique session identifier.
    pub id: String,
    /// When the session was created.
    pub created_at: Instant,
    /// Broadcast sender for SSE events.
    pub event_tx: broadcast::Sender<McpEvent>,
}

impl McpSession {
    /// Create a new session with a unique ID.
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Instant::now(),
            event_tx,
        }
    }

    /// Subscribe to session events for SSE streaming.
    pub fn subscribe(&self) -> broadcast::Receiver<McpEvent> {
        self.event_tx.subscribe()
    }

    /// Send an event to all SSE subscribers.
    pub fn send(&self, event: McpEvent) -> Result<usize, broadcast::error::SendError<McpEvent>> {
        self.event_tx.send(event)
    }
}

impl Default for McpSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Store of live sessions, one map per transport kind.
///
/// Owned by the application state and injected into the HTTP layer; there is
/// no process-global session table. All mutation goes through the RwLocks,
/// so create/remove are safe on a multi-threaded runtime.
#[derive(Clone, Default)]
pub struct SessionStore {
    streamable: Arc<RwLock<HashMap<String, McpSession>>>,
    sse: Arc<RwLock<HashMap<String, McpSession>>>,
}

impl SessionStore {
    /// Create a new, empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, kind: TransportKind) -> &Arc<RwLock<HashMap<String, McpSession>>> {
        match kind {
            TransportKind::Streamable => &self.streamable,
            TransportKind::Sse => &self.sse,
        }
    }

    /// Create a new session and return its ID.
    ///
    /// Ids are generated server-side and never reused within the process
    /// lifetime; a client-supplied id never creates a session.
    pub async fn create(&self, kind: TransportKind) -> String {
        let session = McpSession::new();
        let id = session.id.clone();
        self.map(kind).write().await.insert(id.clone(), session);
        info!("Created {} MCP session: {}", kind.as_str(), id);
        id
    }

    /// Check whether a session exists.
    pub async fn exists(&self, id: &str, kind: TransportKind) -> bool {
        self.map(kind).read().await.contains_key(id)
    }

    /// Subscribe to a session's event stream.
    pub async fn subscribe(
        &self,
        id: &str,
        kind: TransportKind,
    ) -> Option<broadcast::Receiver<McpEvent>> {
        self.map(kind).read().await.get(id).map(|s| s.subscribe())
    }

    /// Send an event to a session's subscribers.
    ///
    /// Returns `false` when the session is gone or no subscriber is listening.
    pub async fn send(&self, id: &str, kind: TransportKind, event: McpEvent) -> bool {
        match self.map(kind).read().await.get(id) {
            Some(session) => session.send(event).is_ok(),
            None => false,
        }
    }

    /// Remove a session when its transport closes.
    ///
    /// Idempotent: removing an id that is already gone is a no-op, not an
    /// error.
    pub async fn remove(&self, id: &str, kind: TransportKind) -> bool {
        if self.map(kind).write().await.remove(id).is_some() {
            info!("Closed {} MCP session: {}", kind.as_str(), id);
            true
        } else {
            debug!("{} MCP session {} already removed", kind.as_str(), id);
            false
        }
    }

    /// Number of currently open sessions for a transport kind.
    pub async fn count(&self, kind: TransportKind) -> usize {
        self.map(kind).read().await.len()
    }

    /// Close every open session across both transports.
    ///
    /// Dropping a session drops its event channel, which ends any stream
    /// still attached to it. Used at process termination only.
    pub async fn shutdown_all(&self) -> usize {
        let mut closed = 0;
        for kind in [TransportKind::Streamable, TransportKind::Sse] {
            let mut sessions = self.map(kind).write().await;
            closed += sessions.len();
            sessions.clear();
        }
        if closed > 0 {
            info!("Closed {} MCP session(s) on shutdown", closed);
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn create_and_lookup() {
        let store = SessionStore::new();
        let id = store.create(TransportKind::Streamable).await;
        assert!(store.exists(&id, TransportKind::Streamable).await);
        assert_eq!(store.count(TransportKind::Streamable).await, 1);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = SessionStore::new();
        let id = store.create(TransportKind::Streamable).await;
        assert!(store.remove(&id, TransportKind::Streamable).await);
        assert!(!store.remove(&id, TransportKind::Streamable).await);
        assert!(!store.exists(&id, TransportKind::Streamable).await);
    }

    #[tokio::test]
    async fn transport_kinds_are_independent_namespaces() {
        let store = SessionStore::new();
        let id = store.create(TransportKind::Sse).await;
        assert!(store.exists(&id, TransportKind::Sse).await);
        assert!(!store.exists(&id, TransportKind::Streamable).await);
        assert_eq!(store.count(TransportKind::Streamable).await, 0);
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let store = SessionStore::new();
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(store.create(TransportKind::Streamable).await));
        }
        assert_eq!(store.count(TransportKind::Streamable).await, 1000);
    }

    #[tokio::test]
    async fn send_reaches_subscribers() {
        let store = SessionStore::new();
        let id = store.create(TransportKind::Sse).await;
        let mut rx = store.subscribe(&id, TransportKind::Sse).await.unwrap();

        assert!(
            store
                .send(&id, TransportKind::Sse, McpEvent::JsonRpc("{}".to_string()))
                .await
        );
        let McpEvent::JsonRpc(payload) = rx.recv().await.unwrap();
        assert_eq!(payload, "{}");
    }

    #[tokio::test]
    async fn send_to_unknown_session_is_rejected() {
        let store = SessionStore::new();
        assert!(
            !store
                .send(
                    "nope",
                    TransportKind::Sse,
                    McpEvent::JsonRpc("{}".to_string())
                )
                .await
        );
    }

    #[tokio::test]
    async fn shutdown_all_drains_both_maps_and_ends_streams() {
        let store = SessionStore::new();
        let sse_id = store.create(TransportKind::Sse).await;
        let mut rx = store.subscribe(&sse_id, TransportKind::Sse).await.unwrap();
        store.create(TransportKind::Streamable).await;

        assert_eq!(store.shutdown_all().await, 2);
        assert_eq!(store.count(TransportKind::Sse).await, 0);
        assert_eq!(store.count(TransportKind::Streamable).await, 0);

        // The sender dropped with the session, so subscribers see Closed.
        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Closed)
        ));
    }
}
