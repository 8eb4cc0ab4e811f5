//! Test: a failing stage ends the run and later stages never start

use crate::helpers::*;
use crate::mock_agent::{MockAgent, Reply};
use blogcrew::core::{CrewConfig, ExecutionStatus, StageState};
use blogcrew::execution::ExecutionError;

#[tokio::test]
async fn test_writer_failure_skips_editor() {
    let pipeline = CrewConfig::batch().unwrap().to_pipeline().unwrap();
    let agent = MockAgent::with_replies(vec![
        Reply::Text("outline".to_string()),
        Reply::Fail("connection reset".to_string()),
        Reply::Text("never used".to_string()),
    ]);

    let result = run_pipeline_with_mock(pipeline, agent.clone()).await;

    match result.output {
        Err(ExecutionError::StageFailed { ref stage, .. }) => assert_eq!(stage, "write"),
        ref other => panic!("expected stage failure, got {:?}", other),
    }
    assert_eq!(agent.calls(), 2);
    assert_eq!(result.started_stages(), ["plan", "write"]);
    assert_eq!(result.pipeline.state.status, ExecutionStatus::Failed);
    assert!(matches!(
        result.pipeline.stage("edit").unwrap().state,
        StageState::Pending
    ));
    assert!(result.pipeline.final_output().is_none());
}

#[tokio::test]
async fn test_failure_message_names_the_stage() {
    let pipeline = CrewConfig::batch().unwrap().to_pipeline().unwrap();
    let agent = MockAgent::with_replies(vec![Reply::Fail("timed out".to_string())]);

    let result = run_pipeline_with_mock(pipeline, agent).await;

    let message = result.output.unwrap_err().to_string();
    assert!(message.contains("plan"));
    assert!(message.contains("timed out"));

    let failed = result.pipeline.failed_stages();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].id, "plan");
}

#[tokio::test]
async fn test_blank_response_counts_as_failure() {
    let pipeline = CrewConfig::batch().unwrap().to_pipeline().unwrap();
    let agent = MockAgent::new(vec!["outline", "   \n"]);

    let result = run_pipeline_with_mock(pipeline, agent.clone()).await;

    assert!(matches!(result.output, Err(ExecutionError::EmptyOutput(ref id)) if id == "write"));
    assert_eq!(agent.calls(), 2);
    assert!(result.pipeline.has_failed());
}
