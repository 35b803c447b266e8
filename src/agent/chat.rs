//! The conversation orchestrator.

use std::sync::{Arc, RwLock};

use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use crate::completion::{CompletionBackend, ToolDefinition};
use crate::config::DEFAULT_COMPRESS_THRESHOLD;
use crate::mcp::{McpTool, ToolEndpoint};
use crate::tokens;
use crate::types::{ChatState, ContextElement, Creativity};

use super::compress;

/// Single authority for conversation state transitions.
///
/// Owns the context, decides when to compress it, drives the completion
/// exchange, executes tool calls the model requests, and feeds their
/// results back for one follow-up completion. Turns are explicitly
/// serialized: the state lock is held for the whole of `ask`, so
/// concurrent callers queue instead of interleaving partial updates.
/// Every mutation publishes a fresh snapshot through a watch channel,
/// which is the only read surface the UI gets.
pub struct ChatAgent {
    backend: Arc<dyn CompletionBackend>,
    tool_endpoint: Arc<dyn ToolEndpoint>,
    system_prompt: String,
    compress_threshold: usize,
    /// Read-mostly descriptor cache, shared across turns.
    tools: RwLock<Vec<McpTool>>,
    state: Mutex<ChatState>,
    publisher: watch::Sender<ChatState>,
}

impl ChatAgent {
    /// Create an agent around already-constructed transports.
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        tool_endpoint: Arc<dyn ToolEndpoint>,
        system_prompt: impl Into<String>,
    ) -> Self {
        let (publisher, _) = watch::channel(ChatState::default());
        Self {
            backend,
            tool_endpoint,
            system_prompt: system_prompt.into(),
            compress_threshold: DEFAULT_COMPRESS_THRESHOLD,
            tools: RwLock::new(Vec::new()),
            state: Mutex::new(ChatState::default()),
            publisher,
        }
    }

    /// Set the sampling temperature for all turns.
    pub fn with_creativity(mut self, creativity: Creativity) -> Self {
        self.state.get_mut().creativity = creativity;
        self
    }

    /// Override the compression threshold (default 10_000 tokens).
    pub fn with_compress_threshold(mut self, threshold: usize) -> Self {
        self.compress_threshold = threshold;
        self
    }

    /// Subscribe to published conversation snapshots.
    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.publisher.subscribe()
    }

    /// Append the system prompt and cache the tool descriptors.
    ///
    /// A failed tool fetch is non-fatal: the session runs with zero
    /// tools and later completions carry no function manifest.
    pub async fn initialize(&self) {
        {
            let mut state = self.state.lock().await;
            state
                .context
                .push(ContextElement::system(self.system_prompt.clone()));
            self.publish(&state);
        }

        match self.tool_endpoint.list_tools().await {
            Ok(tools) => {
                debug!(count = tools.len(), "cached tool descriptors");
                *self.tools.write().unwrap() = tools;
            }
            Err(err) => {
                warn!(error = %err, "tool listing failed; continuing without tools");
            }
        }
    }

    /// Run one user turn to completion and return the final snapshot.
    ///
    /// Failures of the completion backend terminate the turn and land in
    /// `last_error` as a category string. A failed tool call does not:
    /// it becomes an error-text `ToolResult` the model gets to see.
    pub async fn ask(&self, prompt: impl Into<String>) -> ChatState {
        let mut state = self.state.lock().await;
        state.last_error = None;
        state.context.push(ContextElement::user(prompt.into()));
        self.publish(&state);

        if tokens::estimate_context(&state.context) >= self.compress_threshold {
            match compress::compress(self.backend.as_ref(), &state.context, state.creativity).await
            {
                Ok(Some(compressed)) => {
                    state.context = compressed;
                    state.compressed = true;
                    self.publish(&state);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(error = %err, "context compression failed; continuing uncompressed");
                }
            }
        }

        let tools = self.tool_definitions();

        let turn = match self
            .backend
            .complete(&state.context, state.creativity, &tools)
            .await
        {
            Ok(turn) => turn,
            Err(err) => return self.fail_turn(&mut state, &err),
        };

        let Some(call) = turn.tool_call.clone() else {
            state.context.push(ContextElement::Assistant(turn));
            self.publish(&state);
            return state.clone();
        };

        state.context.push(ContextElement::Assistant(turn));
        self.publish(&state);

        let result_text = match self
            .tool_endpoint
            .call_tool(&call.name, &call.arguments)
            .await
        {
            Ok(text) => text,
            // Valid input for the model to reason about, not an abort.
            Err(err) => format!("tool call '{}' failed: {err}", call.name),
        };
        state.context.push(ContextElement::tool_result(result_text));
        self.publish(&state);

        // Single hop: exactly one follow-up completion, no chaining.
        match self
            .backend
            .complete(&state.context, state.creativity, &tools)
            .await
        {
            Ok(turn) => {
                state.context.push(ContextElement::Assistant(turn));
                self.publish(&state);
                state.clone()
            }
            Err(err) => self.fail_turn(&mut state, &err),
        }
    }

    fn fail_turn(&self, state: &mut ChatState, err: &crate::error::ParleyError) -> ChatState {
        warn!(error = %err, "completion failed; turn terminated");
        state.last_error = Some(err.category().to_string());
        self.publish(state);
        state.clone()
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .read()
            .unwrap()
            .iter()
            .map(McpTool::to_definition)
            .collect()
    }

    fn publish(&self, state: &ChatState) {
        self.publisher.send_replace(state.clone());
    }
}
