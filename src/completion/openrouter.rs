//! OpenRouter chat-completions backend.

use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::ParleyConfig;
use crate::error::{ParleyError, Result};
use crate::types::{AssistantTurn, ContextElement, Creativity, ToolCall};

use super::http::{bearer_headers, shared_client, status_to_error};
use super::{context_to_messages, CompletionBackend, ToolDefinition};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// HTTP adapter for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug)]
pub struct OpenRouterBackend {
    model: String,
    api_key: String,
    base_url: String,
    json_output: bool,
}

impl OpenRouterBackend {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            json_output: false,
        }
    }

    /// Build from config; a missing API key is a construction-time
    /// configuration failure.
    pub fn from_config(config: &ParleyConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ParleyError::Configuration("Missing OPENROUTER_API_KEY".into()))?;
        Ok(Self::new(
            config.model.clone(),
            api_key,
            config.base_url.clone(),
        ))
    }

    /// Request `response_format: json_object` on every completion.
    pub fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }

    fn build_request_body(
        &self,
        context: &[ContextElement],
        creativity: Creativity,
        tools: &[ToolDefinition],
    ) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": context_to_messages(context),
            "temperature": creativity.value(),
        });

        let obj = body.as_object_mut().unwrap();

        if self.json_output {
            obj.insert(
                "response_format".into(),
                serde_json::json!({"type": "json_object"}),
            );
        }

        if !tools.is_empty() {
            let tool_defs: Vec<serde_json::Value> = tools
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "type": "function",
                        "function": {
                            "name": t.name,
                            "description": t.description,
                            "parameters": t.parameters,
                        }
                    })
                })
                .collect();
            obj.insert("tools".into(), tool_defs.into());
        }

        body
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterBackend {
    async fn complete(
        &self,
        context: &[ContextElement],
        creativity: Creativity,
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn> {
        let body = self.build_request_body(context, creativity, tools);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %self.model, messages = context.len(), "posting completion");
        let started = Instant::now();

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let text = resp.text().await?;
        if status != 200 {
            return Err(status_to_error(status, &text));
        }

        let data: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| ParleyError::MalformedResponse(format!("unparsable body: {e}")))?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let usage = data
            .usage
            .ok_or_else(|| ParleyError::MalformedResponse("missing usage counters".into()))?;
        let message = data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .ok_or_else(|| ParleyError::MalformedResponse("no choices in response".into()))?;

        let tool_call = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|tc| {
                let arguments = serde_json::from_str(&tc.function.arguments).map_err(|e| {
                    ParleyError::MalformedResponse(format!(
                        "tool call arguments are not valid JSON: {e}"
                    ))
                })?;
                Ok::<_, ParleyError>(ToolCall {
                    id: tc.id,
                    name: tc.function.name,
                    arguments,
                })
            })
            .transpose()?;

        let content = match message.content {
            Some(content) => content,
            None if tool_call.is_some() => String::new(),
            None => return Err(ParleyError::MalformedResponse("missing content".into())),
        };

        debug!(elapsed_ms, used_tokens = usage.total_tokens, "completion ok");

        Ok(AssistantTurn {
            content,
            reasoning: message.reasoning,
            used_tokens: usage.total_tokens,
            elapsed_ms,
            tool_call,
        })
    }
}

// Chat-completions response types (internal)

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<UsageDto>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<MessageDto>,
}

#[derive(Deserialize)]
struct MessageDto {
    content: Option<String>,
    reasoning: Option<String>,
    tool_calls: Option<Vec<ToolCallDto>>,
}

#[derive(Deserialize)]
struct ToolCallDto {
    id: String,
    function: FunctionDto,
}

#[derive(Deserialize)]
struct FunctionDto {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct UsageDto {
    total_tokens: u32,
}
