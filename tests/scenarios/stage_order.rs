//! Test: stages run in declared order and hand their output forward

use crate::helpers::*;
use crate::mock_agent::MockAgent;
use blogcrew::core::{CrewConfig, ExecutionStatus, StageState};

#[tokio::test]
async fn test_batch_runs_planner_writer_editor() {
    let mut pipeline = CrewConfig::batch().unwrap().to_pipeline().unwrap();
    pipeline.set_variable("topic", "Space Exploration");

    let agent = MockAgent::new(vec![
        "OUTLINE: intro, missions, future",
        "# Space Exploration\n\nDRAFT body",
        "# Space Exploration\n\nPOLISHED body",
    ]);
    let result = run_pipeline_with_mock(pipeline, agent.clone()).await;

    assert_eq!(result.output.as_ref().unwrap(), "# Space Exploration\n\nPOLISHED body");
    assert_eq!(result.started_stages(), ["plan", "write", "edit"]);
    assert_eq!(result.completed_stages(), ["plan", "write", "edit"]);
    assert_eq!(result.pipeline.state.status, ExecutionStatus::Completed);

    let requests = agent.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].system.starts_with("You are Content Planner."));
    assert!(requests[1].system.starts_with("You are Content Writer."));
    assert!(requests[2].system.starts_with("You are Editor."));
}

#[tokio::test]
async fn test_each_stage_receives_previous_output() {
    let pipeline = CrewConfig::batch().unwrap().to_pipeline().unwrap();
    let agent = MockAgent::new(vec!["PLAN-TEXT", "DRAFT-TEXT", "FINAL-TEXT"]);

    run_pipeline_with_mock(pipeline, agent.clone()).await;

    let requests = agent.requests();
    assert!(!requests[0].prompt.contains("context you're working with"));
    assert!(requests[1].prompt.contains("PLAN-TEXT"));
    assert!(requests[2].prompt.contains("DRAFT-TEXT"));
    assert!(!requests[2].prompt.contains("PLAN-TEXT"));
}

#[tokio::test]
async fn test_topic_is_rendered_into_prompts() {
    let mut pipeline = CrewConfig::batch().unwrap().to_pipeline().unwrap();
    pipeline.set_variable("topic", "Urban {{ Gardening }}");

    let agent = MockAgent::new(vec!["a", "b", "c"]);
    let result = run_pipeline_with_mock(pipeline, agent.clone()).await;

    assert!(result.output.is_ok());
    let requests = agent.requests();
    assert!(requests[0].system.contains("Plan engaging and factually accurate content on Urban {{ Gardening }}"));
    assert!(requests[0].prompt.contains("noteworthy news on Urban {{ Gardening }}"));
    assert!(requests.iter().all(|r| !r.prompt.contains("{{ topic }}")));
}

#[tokio::test]
async fn test_custom_crew_order_is_respected() {
    let yaml = r#"
name: "Reverse"
agents:
  - id: "a"
    role: "Alpha"
    goal: "First"
    backstory: "Goes first."
  - id: "b"
    role: "Beta"
    goal: "Second"
    backstory: "Goes second."
tasks:
  - id: "zulu"
    agent: "b"
    description: "Start"
    expected_output: "Anything"
  - id: "alpha"
    agent: "a"
    description: "Finish"
    expected_output: "Anything"
"#;
    let pipeline = CrewConfig::from_yaml(yaml).unwrap().to_pipeline().unwrap();
    let result = run_pipeline_with_mock(pipeline, MockAgent::new(vec!["one", "two"])).await;

    assert_eq!(result.started_stages(), ["zulu", "alpha"]);
    assert_eq!(result.output.unwrap(), "two");
    match &result.pipeline.stage("zulu").unwrap().state {
        StageState::Completed { output, .. } => assert_eq!(output, "one"),
        other => panic!("expected completed stage, got {:?}", other),
    }
}
