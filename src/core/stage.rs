//! Stage domain model

use crate::agent::AgentRequest;
use crate::core::{
    config::{AgentDescriptor, TaskDescriptor},
    state::StageState,
};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// A single stage in a pipeline: one agent working one task
#[derive(Debug, Clone)]
pub struct Stage {
    /// Unique stage identifier (the task id)
    pub id: String,

    /// Agent performing the stage
    pub agent: AgentDescriptor,

    /// Task the agent performs
    pub task: TaskDescriptor,

    /// Runtime state
    pub state: StageState,
}

impl Stage {
    pub fn new(agent: AgentDescriptor, task: TaskDescriptor) -> Self {
        Stage {
            id: task.id.clone(),
            agent,
            task,
            state: StageState::Pending,
        }
    }

    /// Build the system message from the agent descriptor
    pub fn system_prompt(&self, variables: &HashMap<String, String>) -> String {
        let mut system = format!(
            "You are {}.\n{}\n\nYour personal goal is: {}",
            render_template(&self.agent.role, variables),
            render_template(&self.agent.backstory, variables).trim(),
            render_template(&self.agent.goal, variables),
        );
        if !self.agent.allow_delegation {
            system.push_str("\n\nYou work alone: do not delegate any part of this task.");
        }
        system
    }

    /// Build the user message, carrying the previous stage's output as context
    pub fn task_prompt(&self, variables: &HashMap<String, String>, previous: Option<&str>) -> String {
        let mut prompt = format!(
            "Current task:\n{}\n\nThis is the expected criteria for your final answer: {}",
            render_template(&self.task.description, variables).trim(),
            render_template(&self.task.expected_output, variables),
        );

        if let Some(context) = previous {
            prompt.push_str("\n\nThis is the context you're working with:\n");
            prompt.push_str(context.trim());
        }

        prompt.push_str("\n\nReturn only your complete final answer.");
        prompt
    }

    /// Build the full request for this stage
    pub fn build_request(
        &self,
        variables: &HashMap<String, String>,
        previous: Option<&str>,
    ) -> AgentRequest {
        AgentRequest::new(
            self.system_prompt(variables),
            self.task_prompt(variables, previous),
        )
    }
}

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("static regex"))
}

/// Replace variables in the form {{ variable_name }}
///
/// Every placeholder is filled in a single pass, so substituted values are
/// never rendered again. Unknown names are left as written.
pub fn render_template(template: &str, variables: &HashMap<String, String>) -> String {
    placeholder()
        .replace_all(template, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
