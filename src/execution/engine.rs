//! Main execution engine - drives the stages of a pipeline in order

use crate::{
    agent::{AgentError, AgentExecutor, TokenUsage},
    core::{ExecutionStatus, Pipeline, StageState},
    execution::StageExecutor,
};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

/// Events that can occur during pipeline execution
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    PipelineStarted {
        execution_id: Uuid,
        pipeline_name: String,
        total_stages: usize,
    },
    StageStarted {
        stage_id: String,
        role: String,
        position: usize,
        total: usize,
    },
    StageCompleted {
        stage_id: String,
        output: String,
        usage: Option<TokenUsage>,
    },
    StageFailed {
        stage_id: String,
        error: String,
    },
    PipelineCompleted {
        execution_id: Uuid,
        status: ExecutionStatus,
    },
}

/// Errors that abort a pipeline run
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Pipeline '{0}' has no stages")]
    EmptyPipeline(String),

    #[error("Stage '{stage}' failed: {source}")]
    StageFailed {
        stage: String,
        #[source]
        source: AgentError,
    },

    #[error("Stage '{0}' returned an empty response")]
    EmptyOutput(String),
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(ExecutionEvent) + Send + Sync>;

/// Main pipeline execution engine
///
/// Stages run one after another; each receives the previous stage's output
/// and the first failure ends the run.
pub struct ExecutionEngine<A> {
    executor: StageExecutor<A>,
    event_handlers: Vec<EventHandler>,
}

impl<A: AgentExecutor> ExecutionEngine<A> {
    pub fn new(agent: A) -> Self {
        Self {
            executor: StageExecutor::new(agent),
            event_handlers: Vec::new(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    fn emit_event(&self, event: ExecutionEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Execute the entire pipeline and return the last stage's output
    pub async fn execute(&self, pipeline: &mut Pipeline) -> Result<String, ExecutionError> {
        let execution_id = pipeline.state.execution_id;
        let total = pipeline.stages.len();

        if total == 0 {
            pipeline.state.fail();
            return Err(ExecutionError::EmptyPipeline(pipeline.name.clone()));
        }

        info!("Starting pipeline execution: {} ({})", pipeline.name, execution_id);
        self.emit_event(ExecutionEvent::PipelineStarted {
            execution_id,
            pipeline_name: pipeline.name.clone(),
            total_stages: total,
        });

        pipeline.state.start(total);
        let variables = pipeline.variables.clone();
        let mut previous: Option<String> = None;

        for (index, stage) in pipeline.stages.iter_mut().enumerate() {
            let started_at = Utc::now();
            stage.state = StageState::Running { started_at };
            self.emit_event(ExecutionEvent::StageStarted {
                stage_id: stage.id.clone(),
                role: stage.agent.role.clone(),
                position: index + 1,
                total,
            });

            let failure = match self
                .executor
                .execute(stage, &variables, previous.as_deref())
                .await
            {
                Ok(response) if response.content.trim().is_empty() => {
                    ExecutionError::EmptyOutput(stage.id.clone())
                }
                Ok(response) => {
                    stage.state = StageState::Completed {
                        output: response.content.clone(),
                        usage: response.usage,
                        started_at,
                        completed_at: Utc::now(),
                    };
                    pipeline.state.stage_completed();
                    self.emit_event(ExecutionEvent::StageCompleted {
                        stage_id: stage.id.clone(),
                        output: response.content.clone(),
                        usage: response.usage,
                    });
                    previous = Some(response.content);
                    continue;
                }
                Err(source) => ExecutionError::StageFailed {
                    stage: stage.id.clone(),
                    source,
                },
            };

            error!("Pipeline {} aborted: {}", pipeline.name, failure);
            stage.state = StageState::Failed {
                error: failure.to_string(),
                started_at,
                failed_at: Utc::now(),
            };
            pipeline.state.fail();
            self.emit_event(ExecutionEvent::StageFailed {
                stage_id: stage.id.clone(),
                error: failure.to_string(),
            });
            self.emit_event(ExecutionEvent::PipelineCompleted {
                execution_id,
                status: ExecutionStatus::Failed,
            });
            return Err(failure);
        }

        pipeline.state.complete();
        info!("Pipeline execution finished: {} - Completed", pipeline.name);
        self.emit_event(ExecutionEvent::PipelineCompleted {
            execution_id,
            status: ExecutionStatus::Completed,
        });

        Ok(previous.unwrap_or_default())
    }
}
