//! Convenience re-exports for common use.

pub use crate::agent::ChatAgent;
pub use crate::completion::{CompletionBackend, OpenRouterBackend, ToolDefinition};
pub use crate::config::ParleyConfig;
pub use crate::error::{ErrorCategory, ParleyError, Result};
pub use crate::mcp::{McpClient, McpTool, ToolEndpoint};
pub use crate::types::{
    AssistantTurn, ChatState, ContextElement, Creativity, Role, ToolCall,
};
