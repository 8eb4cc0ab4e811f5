//! Groq chat-completions client (OpenAI-compatible wire format)

use crate::agent::{AgentClientConfig, AgentError, AgentRequest, AgentResponse, TokenUsage};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for a chat-completions endpoint
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    config: AgentClientConfig,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

impl GroqClient {
    /// Create a new client from configuration
    pub fn new(config: AgentClientConfig) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn headers(&self) -> Result<HeaderMap, AgentError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &self.config.api_key {
            let value = format!("Bearer {}", key);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&value).map_err(|e| AgentError::Internal(e.to_string()))?,
            );
        }
        Ok(headers)
    }

    /// Send one chat completion and return the first choice's text
    pub async fn complete(&self, request: &AgentRequest) -> Result<AgentResponse, AgentError> {
        debug!(
            "Sending chat completion to {} (model {}, prompt length {})",
            self.config.endpoint,
            self.config.model,
            request.prompt.len()
        );

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AgentError::Timeout(self.config.timeout_secs)
                } else {
                    AgentError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("Chat completion returned HTTP {}", status);
            return Err(AgentError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| AgentError::Http(e.to_string()))?;
        parse_chat_response(&text)
    }
}

/// Parse a chat-completions response body
fn parse_chat_response(text: &str) -> Result<AgentResponse, AgentError> {
    let parsed: ChatResponse =
        serde_json::from_str(text).map_err(|e| AgentError::Decode(e.to_string()))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| AgentError::Decode("response has no message content".to_string()))?;

    debug!("Chat completion returned {} bytes", content.len());

    Ok(AgentResponse {
        content,
        model: parsed.model,
        usage: parsed.usage,
    })
}
