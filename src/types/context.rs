//! Conversation context types.

use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};

/// One element of the ordered conversation context.
///
/// Closed sum type, one variant per role: adding a new role is a
/// compile-time exhaustiveness event everywhere the context is matched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ContextElement {
    /// Fixed instructions, always first, never removed by compression.
    System { prompt: String },
    /// A verbatim user turn.
    User { prompt: String },
    /// One LLM response, possibly carrying a pending tool invocation.
    Assistant(AssistantTurn),
    /// Output of an executed tool call, immediately following the
    /// `Assistant` element that requested it.
    #[serde(rename = "tool")]
    ToolResult { content: String },
}

impl ContextElement {
    pub fn system(prompt: impl Into<String>) -> Self {
        Self::System {
            prompt: prompt.into(),
        }
    }

    pub fn user(prompt: impl Into<String>) -> Self {
        Self::User {
            prompt: prompt.into(),
        }
    }

    pub fn tool_result(content: impl Into<String>) -> Self {
        Self::ToolResult {
            content: content.into(),
        }
    }

    /// Role this element maps to on the completion wire.
    pub fn role(&self) -> Role {
        match self {
            Self::System { .. } => Role::System,
            Self::User { .. } => Role::User,
            Self::Assistant(_) => Role::Assistant,
            Self::ToolResult { .. } => Role::Tool,
        }
    }

    /// The plain text carried by this element.
    pub fn text(&self) -> &str {
        match self {
            Self::System { prompt } | Self::User { prompt } => prompt,
            Self::Assistant(turn) => &turn.content,
            Self::ToolResult { content } => content,
        }
    }
}

/// Conversation role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

/// One model response: content plus observability counters, and the tool
/// invocation the model requested, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantTurn {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    pub used_tokens: u32,
    pub elapsed_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCall>,
}

impl AssistantTurn {
    /// Plain-content turn with zeroed counters (summary and test fixtures).
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            reasoning: None,
            used_tokens: 0,
            elapsed_ms: 0,
            tool_call: None,
        }
    }
}

/// A tool call requested by the model.
///
/// `arguments` is the already-parsed JSON payload, ready to hand to the
/// tool protocol client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// Sampling temperature, valid within `[0, 2]` inclusive.
///
/// An out-of-range value is a construction-time contract violation, not
/// a runtime-recoverable failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Creativity(f32);

impl Creativity {
    pub fn new(value: f32) -> Result<Self> {
        if (0.0..=2.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ParleyError::Configuration(format!(
                "creativity must be within [0, 2], got {value}"
            )))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Creativity {
    fn default() -> Self {
        Self(0.7)
    }
}

/// Immutable snapshot of the conversation, published on every mutation.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub context: Vec<ContextElement>,
    pub last_error: Option<String>,
    pub creativity: Creativity,
    pub compressed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creativity_bounds_are_inclusive() {
        assert!(Creativity::new(0.0).is_ok());
        assert!(Creativity::new(2.0).is_ok());
        assert!(Creativity::new(-0.1).is_err());
        assert!(Creativity::new(2.1).is_err());
    }

    #[test]
    fn out_of_range_creativity_is_a_configuration_error() {
        let err = Creativity::new(2.1).unwrap_err();
        assert_eq!(err.category().to_string(), "configuration_failure");
    }

    #[test]
    fn elements_map_to_wire_roles() {
        assert_eq!(ContextElement::system("s").role().as_str(), "system");
        assert_eq!(ContextElement::user("u").role().as_str(), "user");
        assert_eq!(
            ContextElement::Assistant(AssistantTurn::text("a")).role().as_str(),
            "assistant"
        );
        assert_eq!(ContextElement::tool_result("t").role().as_str(), "tool");
    }
}
