//! Pipeline domain model

use crate::core::{
    config::CrewConfig,
    stage::Stage,
    state::{ExecutionStatus, PipelineState, StageState},
};
use anyhow::Result;
use std::collections::HashMap;

/// A pipeline definition: stages run strictly in list order
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Pipeline name
    pub name: String,

    /// Variables available to every stage prompt
    pub variables: HashMap<String, String>,

    /// Stages in execution order
    pub stages: Vec<Stage>,

    /// Execution state
    pub state: PipelineState,
}

impl Pipeline {
    /// Create a pipeline from a crew definition
    ///
    /// Fails if a task names an agent the crew does not define.
    pub fn from_config(config: &CrewConfig) -> Result<Self> {
        let stages = config
            .tasks
            .iter()
            .map(|task| {
                let agent = config.agent(&task.agent).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Task '{}' is assigned to non-existent agent '{}'",
                        task.id,
                        task.agent
                    )
                })?;
                Ok(Stage::new(agent.clone(), task.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Pipeline {
            name: config.name.clone(),
            variables: config.variables.clone(),
            stages,
            state: PipelineState::new(),
        })
    }

    /// Set (or override) a prompt variable
    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Get a stage by ID
    pub fn stage(&self, id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id)
    }

    /// Stage ids in execution order
    pub fn execution_order(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.id.as_str()).collect()
    }

    /// Check if pipeline has failed
    pub fn has_failed(&self) -> bool {
        self.state.status == ExecutionStatus::Failed
    }

    /// Output of the last stage, once the run has completed
    pub fn final_output(&self) -> Option<&str> {
        if self.state.status != ExecutionStatus::Completed {
            return None;
        }
        self.stages.last().and_then(|s| s.state.output())
    }

    /// Stages that ended in failure
    pub fn failed_stages(&self) -> Vec<&Stage> {
        self.stages
            .iter()
            .filter(|s| matches!(s.state, StageState::Failed { .. }))
            .collect()
    }
}
