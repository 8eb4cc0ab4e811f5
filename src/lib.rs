//! blogcrew - plan, write and edit blog posts with a crew of LLM agents

pub mod agent;
pub mod cli;
pub mod core;
pub mod execution;
pub mod output;
pub mod presenter;

// Re-export commonly used types
pub use agent::{AgentClientConfig, AgentError, AgentExecutor, AgentRequest, AgentResponse, GroqClient};
pub use core::{CrewConfig, ExecutionStatus, Pipeline, Settings, Stage, StageState};
pub use execution::{ExecutionEngine, ExecutionError, ExecutionEvent};
pub use output::{OutputPaths, OutputWriter};
pub use presenter::{BlogRequest, ImageOutcome, ImageSearch, Presentation, Presenter};
