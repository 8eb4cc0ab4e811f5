//! Crew definition loaded from YAML

use crate::core::Pipeline;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

const BATCH_CREW: &str = include_str!("../../crews/batch.yaml");
const INTERACTIVE_CREW: &str = include_str!("../../crews/interactive.yaml");

/// Top-level crew definition: who works, and in which order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewConfig {
    /// Crew name, used as the pipeline name
    pub name: String,

    /// Default variables (e.g. `topic`) available to every prompt
    #[serde(default)]
    pub variables: HashMap<String, String>,

    /// Agents available to tasks
    pub agents: Vec<AgentDescriptor>,

    /// Tasks, executed strictly in the listed order
    pub tasks: Vec<TaskDescriptor>,
}

/// Who performs a stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// Identifier referenced by tasks
    pub id: String,

    /// Role name, e.g. "Content Planner"
    pub role: String,

    /// What the agent is trying to achieve
    pub goal: String,

    /// Persona text conditioning the agent
    pub backstory: String,

    /// Whether the agent may hand work to another agent
    #[serde(default)]
    pub allow_delegation: bool,
}

/// What a stage must produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    /// Unique task identifier, used as the stage id
    pub id: String,

    /// Id of the agent assigned to this task
    pub agent: String,

    /// Task instructions
    pub description: String,

    /// Description of the expected final answer
    pub expected_output: String,
}

impl CrewConfig {
    /// Load a crew definition from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a crew definition from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: CrewConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Built-in planner → writer → editor crew
    pub fn batch() -> Result<Self> {
        Self::from_yaml(BATCH_CREW)
    }

    /// Built-in writer → editor crew driven by topic, tone and language
    pub fn interactive() -> Result<Self> {
        Self::from_yaml(INTERACTIVE_CREW)
    }

    /// Validate the crew definition
    pub fn validate(&self) -> Result<()> {
        if self.tasks.is_empty() {
            anyhow::bail!("Crew '{}' defines no tasks", self.name);
        }

        let mut agent_ids = HashSet::new();
        for agent in &self.agents {
            if !agent_ids.insert(agent.id.as_str()) {
                anyhow::bail!("Duplicate agent ID: {}", agent.id);
            }
        }

        let mut task_ids = HashSet::new();
        for task in &self.tasks {
            if !task_ids.insert(task.id.as_str()) {
                anyhow::bail!("Duplicate task ID: {}", task.id);
            }
            if !agent_ids.contains(task.agent.as_str()) {
                anyhow::bail!(
                    "Task '{}' is assigned to non-existent agent '{}'",
                    task.id,
                    task.agent
                );
            }
        }

        Ok(())
    }

    /// Look up an agent by id
    pub fn agent(&self, id: &str) -> Option<&AgentDescriptor> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Build a pipeline with the crew's default variables
    pub fn to_pipeline(&self) -> Result<Pipeline> {
        Pipeline::from_config(self)
    }
}
