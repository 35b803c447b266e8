//! Connection-per-call JSON-RPC client for the tool endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::config::DEFAULT_TOOL_CALL_TIMEOUT;
use crate::error::{ParleyError, Result};

use super::schema::{McpRequest, McpResponse, McpTool, ToolListResult};

type ToolSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Remote tool endpoint: list available tools, invoke one by name.
#[async_trait]
pub trait ToolEndpoint: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<McpTool>>;

    async fn call_tool(&self, name: &str, arguments: &serde_json::Value) -> Result<String>;
}

/// Client for the WebSocket tool endpoint.
///
/// Each operation opens a fresh connection, performs exactly one
/// correlated request/response exchange, and tears the connection down,
/// whether or not a response arrived. The per-call lifecycle is
/// connect, send, await the matching id, bounded by a single timeout.
/// No retries happen here; a failed call is the caller's input to handle.
pub struct McpClient {
    url: String,
    timeout: Duration,
    next_id: AtomicU64,
}

impl McpClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TOOL_CALL_TIMEOUT,
            next_id: AtomicU64::new(1),
        }
    }

    /// Override the per-exchange timeout (default 15s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn exchange(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = serde_json::to_string(&McpRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        })?;

        debug!(id, method, url = %self.url, "tool exchange");

        match tokio::time::timeout(self.timeout, run_exchange(&self.url, id, method, request))
            .await
        {
            Ok(outcome) => outcome,
            // Dropping the in-flight future drops the socket with it.
            Err(_) => Err(ParleyError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

#[async_trait]
impl ToolEndpoint for McpClient {
    async fn list_tools(&self) -> Result<Vec<McpTool>> {
        let params = json!({
            "name": "list_tools",
            "protocolVersion": "a1",
            "capabilities": { "tools": { "listChanged": true } },
            "clientInfo": { "name": "parley", "version": env!("CARGO_PKG_VERSION") },
        });
        let result = self.exchange("tools/list", params).await?;

        let listing: ToolListResult = serde_json::from_value(result)
            .map_err(|e| ParleyError::MalformedResponse(format!("no tools in response: {e}")))?;
        let mut tools: Vec<McpTool> = listing.tools.into_values().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tools)
    }

    async fn call_tool(&self, name: &str, arguments: &serde_json::Value) -> Result<String> {
        let params = json!({ "name": name, "arguments": arguments });
        let result = self.exchange("tools/call", params).await?;
        Ok(extract_call_text(&result))
    }
}

/// Connect, run one exchange, and close the socket regardless of outcome.
async fn run_exchange(
    url: &str,
    id: u64,
    method: &str,
    request: String,
) -> Result<serde_json::Value> {
    let (mut socket, _) = connect_async(url)
        .await
        .map_err(|e| ParleyError::Transport(format!("connect failed: {e}")))?;
    let outcome = drive_exchange(&mut socket, id, method, request).await;
    let _ = socket.close(None).await;
    outcome
}

async fn drive_exchange(
    socket: &mut ToolSocket,
    id: u64,
    method: &str,
    request: String,
) -> Result<serde_json::Value> {
    socket
        .send(Message::Text(request))
        .await
        .map_err(|e| ParleyError::Transport(format!("send failed: {e}")))?;

    while let Some(frame) = socket.next().await {
        let frame = frame.map_err(|e| ParleyError::Transport(format!("connection failed: {e}")))?;
        match frame {
            Message::Text(text) => {
                let response: McpResponse = serde_json::from_str(&text).map_err(|e| {
                    ParleyError::MalformedResponse(format!("unparsable response frame: {e}"))
                })?;
                // Frames for other ids are not ours to consume.
                if response.id != Some(id) {
                    continue;
                }
                if let Some(error) = response.error {
                    return Err(ParleyError::ToolInvocation {
                        tool_name: method.to_string(),
                        message: format!("error {}: {}", error.code, error.message),
                    });
                }
                return match response.result {
                    Some(serde_json::Value::Null) | None => Err(ParleyError::ToolInvocation {
                        tool_name: method.to_string(),
                        message: "empty result".into(),
                    }),
                    Some(result) => Ok(result),
                };
            }
            Message::Close(_) => break,
            // Pings are answered by tungstenite itself.
            _ => {}
        }
    }

    Err(ParleyError::Transport(
        "connection closed before response".into(),
    ))
}

/// Tool-specific result extraction: the read tool returns the file body
/// under `data`; the write tool returns an acknowledgement with no
/// meaningful payload, which degrades to the serialized result object.
fn extract_call_text(result: &serde_json::Value) -> String {
    match result.get("data") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => result.to_string(),
    }
}
