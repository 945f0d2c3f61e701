//! Shared application state.

use crate::mcp::SessionStore;

/// Application state shared across all HTTP handlers.
///
/// Holds the session store explicitly rather than relying on process-wide
/// globals; tests construct an isolated instance per app.
#[derive(Clone, Default)]
pub struct AppState {
    sessions: SessionStore,
}

impl AppState {
    /// Create a new application state with an empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
