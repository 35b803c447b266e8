//! Wire types for the tool-invocation protocol.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::completion::ToolDefinition;

/// A tool advertised by the tool endpoint.
///
/// `input_schema` is JSON-schema-as-text, exactly as the endpoint sends
/// it; it is only parsed when building a completion function manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct McpTool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: String,
}

impl McpTool {
    /// Convert to a completion-side tool definition.
    ///
    /// An unparsable schema degrades to an unconstrained object schema
    /// rather than failing the whole completion request.
    pub fn to_definition(&self) -> ToolDefinition {
        let parameters = serde_json::from_str(&self.input_schema)
            .unwrap_or_else(|_| serde_json::json!({"type": "object"}));
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters,
        }
    }
}

/// One JSON-RPC request frame.
#[derive(Debug, Serialize)]
pub(crate) struct McpRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

/// One JSON-RPC response frame, carrying either `result` or `error`.
#[derive(Debug, Deserialize)]
pub(crate) struct McpResponse {
    #[serde(default)]
    pub id: Option<u64>,
    pub result: Option<serde_json::Value>,
    pub error: Option<McpErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct McpErrorObject {
    pub code: i64,
    pub message: String,
}

/// `tools/list` result payload: tools keyed by name.
#[derive(Debug, Deserialize)]
pub(crate) struct ToolListResult {
    pub tools: HashMap<String, McpTool>,
}
