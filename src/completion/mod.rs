//! Completion backend trait and wire mapping.

pub mod http;
pub mod openrouter;

pub use openrouter::OpenRouterBackend;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AssistantTurn, ContextElement, Creativity};

/// Tool definition sent to the completion API as a function manifest.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Stateless transport adapter for the completion backend: one HTTP
/// round trip per call, conversation snapshot in, assistant turn out.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        context: &[ContextElement],
        creativity: Creativity,
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn>;
}

/// Map each context element to a role-tagged wire message, in order.
///
/// An assistant turn carrying a pending tool call serializes the call
/// descriptor alongside (possibly null) content; everything else is a
/// plain `{role, content}` pair.
pub(crate) fn context_to_messages(context: &[ContextElement]) -> Vec<serde_json::Value> {
    context
        .iter()
        .map(|element| match element {
            ContextElement::Assistant(turn) => match &turn.tool_call {
                Some(call) => serde_json::json!({
                    "role": "assistant",
                    "content": if turn.content.is_empty() {
                        serde_json::Value::Null
                    } else {
                        serde_json::Value::String(turn.content.clone())
                    },
                    "tool_calls": [{
                        "id": call.id,
                        "type": "function",
                        "function": {
                            "name": call.name,
                            "arguments": call.arguments.to_string(),
                        }
                    }],
                }),
                None => serde_json::json!({
                    "role": "assistant",
                    "content": turn.content,
                }),
            },
            other => serde_json::json!({
                "role": other.role().as_str(),
                "content": other.text(),
            }),
        })
        .collect()
}
