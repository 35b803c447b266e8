//! Error types for Parley.

use strum::Display;
use thiserror::Error;

/// Primary error type for all Parley operations.
#[derive(Error, Debug)]
pub enum ParleyError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Tool invocation error: {tool_name}: {message}")]
    ToolInvocation { tool_name: String, message: String },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Broad failure category, surfaced to the UI instead of raw error text.
///
/// Per-call failures from the completion and tool clients collapse into
/// one of these; the orchestrator records the snake_case rendering in
/// `last_error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    NetworkFailure,
    MalformedResponse,
    ToolInvocationFailure,
    ConfigurationFailure,
}

impl ParleyError {
    /// Classify this error into a category.
    ///
    /// Connect failures, timeouts, closed connections, and non-2xx
    /// statuses all count as network failures; only unparsable or
    /// field-incomplete bodies count as malformed.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::ConfigurationFailure,
            Self::Network(_) | Self::Api { .. } | Self::Timeout(_) | Self::Transport(_) => {
                ErrorCategory::NetworkFailure
            }
            Self::MalformedResponse(_) | Self::Serialization(_) => ErrorCategory::MalformedResponse,
            Self::ToolInvocation { .. } => ErrorCategory::ToolInvocationFailure,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ParleyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_are_network_failures() {
        let err = ParleyError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.category(), ErrorCategory::NetworkFailure);
        assert_eq!(err.category().to_string(), "network_failure");
    }

    #[test]
    fn timeout_and_transport_are_network_failures() {
        assert_eq!(
            ParleyError::Timeout(15_000).category(),
            ErrorCategory::NetworkFailure
        );
        assert_eq!(
            ParleyError::Transport("connection closed".into()).category(),
            ErrorCategory::NetworkFailure
        );
    }

    #[test]
    fn malformed_body_is_distinguishable_from_network() {
        let err = ParleyError::MalformedResponse("missing usage".into());
        assert_eq!(err.category(), ErrorCategory::MalformedResponse);
        assert_eq!(err.category().to_string(), "malformed_response");
    }

    #[test]
    fn tool_errors_map_to_tool_invocation_failure() {
        let err = ParleyError::ToolInvocation {
            tool_name: "read_file".into(),
            message: "no such file".into(),
        };
        assert_eq!(err.category().to_string(), "tool_invocation_failure");
    }
}
