//! Shared test doubles: scripted completion backend and tool endpoint.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use parley::completion::{CompletionBackend, ToolDefinition};
use parley::error::{ParleyError, Result};
use parley::mcp::{McpTool, ToolEndpoint};
use parley::types::{AssistantTurn, ContextElement, Creativity, ToolCall};

/// One captured completion request.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub context: Vec<ContextElement>,
    pub tools: Vec<ToolDefinition>,
}

/// A completion backend that returns scripted turns in FIFO order and
/// records every request it sees.
pub struct MockBackend {
    responses: Mutex<VecDeque<Result<AssistantTurn>>>,
    requests: Mutex<Vec<CapturedRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_text(&self, text: &str) {
        self.queue_turn(AssistantTurn::text(text));
    }

    pub fn queue_turn(&self, turn: AssistantTurn) {
        self.responses.lock().unwrap().push_back(Ok(turn));
    }

    pub fn queue_tool_call(&self, id: &str, name: &str, arguments: serde_json::Value) {
        self.queue_turn(AssistantTurn {
            tool_call: Some(ToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments,
            }),
            ..AssistantTurn::text("")
        });
    }

    pub fn queue_error(&self, err: ParleyError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, index: usize) -> CapturedRequest {
        self.requests.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(
        &self,
        context: &[ContextElement],
        _creativity: Creativity,
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn> {
        self.requests.lock().unwrap().push(CapturedRequest {
            context: context.to_vec(),
            tools: tools.to_vec(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AssistantTurn::text("{}")))
    }
}

/// A tool endpoint with scripted list/call results.
pub struct MockToolEndpoint {
    list_result: Mutex<Option<Result<Vec<McpTool>>>>,
    call_results: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MockToolEndpoint {
    pub fn new() -> Self {
        Self {
            list_result: Mutex::new(None),
            call_results: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_tools(tools: Vec<McpTool>) -> Self {
        let endpoint = Self::new();
        *endpoint.list_result.lock().unwrap() = Some(Ok(tools));
        endpoint
    }

    pub fn with_list_error(err: ParleyError) -> Self {
        let endpoint = Self::new();
        *endpoint.list_result.lock().unwrap() = Some(Err(err));
        endpoint
    }

    pub fn queue_call_result(&self, text: &str) {
        self.call_results
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
    }

    pub fn queue_call_error(&self, err: ParleyError) {
        self.call_results.lock().unwrap().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolEndpoint for MockToolEndpoint {
    async fn list_tools(&self) -> Result<Vec<McpTool>> {
        self.list_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn call_tool(&self, name: &str, arguments: &serde_json::Value) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), arguments.clone()));
        self.call_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

/// A read/write tool pair matching the reference endpoint.
pub fn reference_tools() -> Vec<McpTool> {
    vec![
        McpTool {
            name: "read_file".to_string(),
            description: "Reads the file for a given date key".to_string(),
            input_schema: r#"{"type":"object","properties":{"name":{"type":"string"}}}"#
                .to_string(),
        },
        McpTool {
            name: "write_file".to_string(),
            description: "Writes the file for a given date key".to_string(),
            input_schema:
                r#"{"type":"object","properties":{"name":{"type":"string"},"content":{"type":"string"}}}"#
                    .to_string(),
        },
    ]
}
