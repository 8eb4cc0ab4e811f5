//! Mock agent and image search for deterministic, fast tests

use async_trait::async_trait;
use blogcrew::agent::{AgentError, AgentExecutor, AgentRequest, AgentResponse};
use blogcrew::presenter::{ImageError, ImageOutcome, ImageSearch};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One scripted reply
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(String),
}

/// Mock agent that returns predefined replies and records every request
///
/// Useful for:
/// - Checking stage order and the text handed from stage to stage
/// - Simulating an LLM failure at a chosen stage
#[derive(Clone)]
pub struct MockAgent {
    replies: Arc<Vec<Reply>>,
    index: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<AgentRequest>>>,
}

impl MockAgent {
    pub fn new(responses: Vec<&str>) -> Self {
        Self::with_replies(responses.into_iter().map(|r| Reply::Text(r.to_string())).collect())
    }

    pub fn with_replies(replies: Vec<Reply>) -> Self {
        Self {
            replies: Arc::new(replies),
            index: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of requests received so far
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// Copy of every request received, in order
    pub fn requests(&self) -> Vec<AgentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentExecutor for MockAgent {
    async fn execute(&self, request: &AgentRequest) -> Result<AgentResponse, AgentError> {
        self.requests.lock().unwrap().push(request.clone());
        let idx = self.index.fetch_add(1, Ordering::SeqCst);

        match self.replies.get(idx) {
            Some(Reply::Text(text)) => Ok(AgentResponse::new(text.clone())),
            Some(Reply::Fail(message)) => Err(AgentError::Http(message.clone())),
            None => Err(AgentError::Internal(format!(
                "MockAgent: No response available for request {} (have {} responses)",
                idx + 1,
                self.replies.len()
            ))),
        }
    }
}

/// Image search returning a fixed outcome and counting queries
#[derive(Clone)]
pub struct MockImageSearch {
    outcome: Result<ImageOutcome, String>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockImageSearch {
    pub fn found(url: &str) -> Self {
        Self::with_outcome(Ok(ImageOutcome::Found { url: url.to_string() }))
    }

    pub fn not_found() -> Self {
        Self::with_outcome(Ok(ImageOutcome::NotFound))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_outcome(Err(message.to_string()))
    }

    fn with_outcome(outcome: Result<ImageOutcome, String>) -> Self {
        Self {
            outcome,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSearch for MockImageSearch {
    async fn search(&self, query: &str) -> Result<ImageOutcome, ImageError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.outcome.clone().map_err(ImageError::Http)
    }
}
