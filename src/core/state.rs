//! Execution state models

use crate::agent::TokenUsage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall pipeline execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Pipeline has not started
    Pending,
    /// Pipeline is currently running
    Running,
    /// Pipeline completed successfully
    Completed,
    /// Pipeline failed
    Failed,
}

/// State of a single stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageState {
    /// Stage has not run yet
    Pending,
    /// Stage is currently running
    Running {
        started_at: DateTime<Utc>,
    },
    /// Stage completed successfully
    Completed {
        output: String,
        usage: Option<TokenUsage>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
    /// Stage failed; the run stops here
    Failed {
        error: String,
        started_at: DateTime<Utc>,
        failed_at: DateTime<Utc>,
    },
}

impl StageState {
    /// Output of a completed stage
    pub fn output(&self) -> Option<&str> {
        match self {
            StageState::Completed { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// Overall pipeline state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    /// Unique execution ID
    pub execution_id: Uuid,

    /// Current execution status
    pub status: ExecutionStatus,

    /// When execution started
    pub started_at: Option<DateTime<Utc>>,

    /// When execution finished
    pub completed_at: Option<DateTime<Utc>>,

    /// Number of stages in the run
    pub total_stages: usize,

    /// Number of stages that have completed
    pub completed_stages: usize,
}

impl PipelineState {
    pub fn new() -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            status: ExecutionStatus::Pending,
            started_at: None,
            completed_at: None,
            total_stages: 0,
            completed_stages: 0,
        }
    }

    /// Mark the run as started
    pub fn start(&mut self, total_stages: usize) {
        self.status = ExecutionStatus::Running;
        self.started_at = Some(Utc::now());
        self.total_stages = total_stages;
        self.completed_stages = 0;
    }

    /// Record one completed stage
    pub fn stage_completed(&mut self) {
        self.completed_stages += 1;
    }

    pub fn complete(&mut self) {
        self.status = ExecutionStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    pub fn fail(&mut self) {
        self.status = ExecutionStatus::Failed;
        self.completed_at = Some(Utc::now());
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}
