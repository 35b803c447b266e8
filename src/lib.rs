//! Parley: a conversation orchestration engine.
//!
//! Drives a chat session against an LLM completion backend: maintains the
//! ordered conversation context, compresses it when it outgrows the model's
//! input budget, detects tool calls in model responses, and executes them
//! over a correlated JSON-RPC exchange with a remote tool endpoint.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use parley::prelude::*;
//!
//! # async fn example() -> parley::error::Result<()> {
//! let config = ParleyConfig::from_env();
//! let backend = Arc::new(OpenRouterBackend::from_config(&config)?);
//! let tools = Arc::new(McpClient::new(config.tool_endpoint.clone()));
//!
//! let agent = ChatAgent::new(backend, tools, "You are a helpful adviser.");
//! agent.initialize().await;
//! let state = agent.ask("List my todos for 01-01-2025").await;
//! println!("{:?}", state.context.last());
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod completion;
pub mod config;
pub mod error;
pub mod mcp;
pub mod prelude;
pub mod tokens;
pub mod types;
