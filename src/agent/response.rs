//! Agent response types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for agent operations
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Response from the agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The response content
    pub content: String,

    /// Model that produced the response (if reported)
    pub model: Option<String>,

    /// Token usage information (if available)
    pub usage: Option<TokenUsage>,
}

impl AgentResponse {
    /// Create a new agent response
    pub fn new(content: String) -> Self {
        Self {
            content,
            model: None,
            usage: None,
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
