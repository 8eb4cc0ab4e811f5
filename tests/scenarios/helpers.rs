//! Test utility functions

use crate::mock_agent::MockAgent;
use blogcrew::core::Pipeline;
use blogcrew::execution::{ExecutionEngine, ExecutionError, ExecutionEvent};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Result of running a pipeline with a mock agent
pub struct PipelineTestResult {
    pub pipeline: Pipeline,
    pub output: Result<String, ExecutionError>,
    pub events: Vec<ExecutionEvent>,
}

impl PipelineTestResult {
    /// Stage ids in the order they were started
    pub fn started_stages(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ExecutionEvent::StageStarted { stage_id, .. } => Some(stage_id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Stage ids in the order they completed
    pub fn completed_stages(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ExecutionEvent::StageCompleted { stage_id, .. } => Some(stage_id.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Run a pipeline with a mock agent, capturing every event
pub async fn run_pipeline_with_mock(mut pipeline: Pipeline, agent: MockAgent) -> PipelineTestResult {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();

    let mut engine = ExecutionEngine::new(agent);
    engine.add_event_handler(move |event| sink.lock().unwrap().push(event));

    let output = engine.execute(&mut pipeline).await;
    let events = events.lock().unwrap().clone();

    PipelineTestResult {
        pipeline,
        output,
        events,
    }
}

/// Fresh, unique directory under the OS temp dir
pub fn temp_output_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("blogcrew-{}-{}", name, uuid::Uuid::new_v4()))
}
