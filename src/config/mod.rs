//! Configuration (code > env > .env file).

use std::time::Duration;

/// Default completion model, an OpenRouter free tier model.
pub const DEFAULT_MODEL: &str = "tngtech/deepseek-r1t2-chimera:free";

/// Default tool endpoint (local WebSocket JSON-RPC server).
pub const DEFAULT_TOOL_ENDPOINT: &str = "ws://127.0.0.1:8181/mcp";

/// Serialized-context token count at which compression kicks in.
pub const DEFAULT_COMPRESS_THRESHOLD: usize = 10_000;

/// How long a single tool protocol exchange may take end to end.
pub const DEFAULT_TOOL_CALL_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for the orchestration engine and its transports.
///
/// Transports are constructed up front from this config; a missing
/// required secret surfaces at construction time, not on first use.
#[derive(Debug, Clone)]
pub struct ParleyConfig {
    /// Completion backend API key (required to build the HTTP backend).
    pub api_key: Option<String>,
    /// Completion backend base URL override.
    pub base_url: Option<String>,
    /// Completion model identifier.
    pub model: String,
    /// WebSocket URL of the tool endpoint.
    pub tool_endpoint: String,
    /// Token threshold that triggers context compression.
    pub compress_threshold: usize,
    /// Per-call timeout for tool protocol exchanges.
    pub tool_call_timeout: Duration,
}

impl Default for ParleyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            tool_endpoint: DEFAULT_TOOL_ENDPOINT.to_string(),
            compress_threshold: DEFAULT_COMPRESS_THRESHOLD,
            tool_call_timeout: DEFAULT_TOOL_CALL_TIMEOUT,
        }
    }
}

impl ParleyConfig {
    /// Load from environment variables (`OPENROUTER_API_KEY`,
    /// `PARLEY_BASE_URL`, `PARLEY_MODEL`, `PARLEY_TOOL_ENDPOINT`).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();

        if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("PARLEY_BASE_URL") {
            config.base_url = Some(url);
        }
        if let Ok(model) = std::env::var("PARLEY_MODEL") {
            config.model = model;
        }
        if let Ok(url) = std::env::var("PARLEY_TOOL_ENDPOINT") {
            config.tool_endpoint = url;
        }

        config
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
