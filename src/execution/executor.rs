//! Stage executor - runs individual stages with the agent

use crate::{
    agent::{AgentError, AgentExecutor, AgentResponse},
    core::Stage,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Executes a single stage
pub struct StageExecutor<A> {
    agent: A,
}

impl<A: AgentExecutor> StageExecutor<A> {
    pub fn new(agent: A) -> Self {
        Self { agent }
    }

    /// Run one stage, handing it the previous stage's output
    pub async fn execute(
        &self,
        stage: &Stage,
        variables: &HashMap<String, String>,
        previous: Option<&str>,
    ) -> Result<AgentResponse, AgentError> {
        info!("Executing stage: {} ({})", stage.id, stage.agent.role);

        let request = stage.build_request(variables, previous);
        debug!("System prompt for stage {}: {}", stage.id, request.system);
        debug!("Task prompt for stage {}: {}", stage.id, request.prompt);

        match self.agent.execute(&request).await {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    debug!(
                        "Stage {} used {} tokens ({} prompt, {} completion)",
                        stage.id, usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
                    );
                }
                Ok(response)
            }
            Err(e) => {
                warn!("Stage {} failed: {}", stage.id, e);
                Err(e)
            }
        }
    }
}
