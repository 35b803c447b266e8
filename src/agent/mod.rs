//! Conversation orchestration: state transitions, compression, tool loop.

pub mod chat;
pub mod compress;

pub use chat::ChatAgent;
