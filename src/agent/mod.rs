//! LLM agent client used by every pipeline stage

pub mod client;
pub mod groq;
pub mod response;

use async_trait::async_trait;
use std::sync::Arc;

pub use client::AgentClientConfig;
pub use groq::GroqClient;
pub use response::{AgentError, AgentResponse, TokenUsage};

/// A single prompt sent to the agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRequest {
    /// System message conditioning the agent (role, goal, backstory)
    pub system: String,

    /// User message carrying the task and prior stage context
    pub prompt: String,
}

impl AgentRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
        }
    }
}

/// Trait for agent execution - allows for different implementations
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Execute a prompt and return the complete response
    async fn execute(&self, request: &AgentRequest) -> Result<AgentResponse, AgentError>;
}

#[async_trait]
impl AgentExecutor for GroqClient {
    async fn execute(&self, request: &AgentRequest) -> Result<AgentResponse, AgentError> {
        self.complete(request).await
    }
}

#[async_trait]
impl AgentExecutor for Arc<dyn AgentExecutor> {
    async fn execute(&self, request: &AgentRequest) -> Result<AgentResponse, AgentError> {
        (**self).execute(request).await
    }
}
