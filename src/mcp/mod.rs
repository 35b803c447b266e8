//! Tool-invocation protocol client (JSON-RPC over WebSocket).

pub mod client;
pub mod schema;

pub use client::{McpClient, ToolEndpoint};
pub use schema::McpTool;
