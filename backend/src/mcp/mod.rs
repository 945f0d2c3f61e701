//! MCP (Model Context Protocol) support.
//!
//! Implements the MCP 2025-03-26 protocol over two transports:
//!
//! - Streamable HTTP (`POST`/`GET`/`DELETE /mcp`), sessions keyed by the
//!   `Mcp-Session-Id` header
//! - Legacy SSE (`GET /sse` + `POST /messages`), sessions keyed by the
//!   `sessionId` query parameter
//!
//! Session lifecycle for both transports is tracked by [`SessionStore`],
//! which keeps one map per transport kind.

pub mod handler;
pub mod session;
pub mod tools;

pub use handler::McpHandler;
pub use session::{McpEvent, McpSession, SessionStore, TransportKind};
