//! Test: the final post lands in timestamped Markdown and HTML files

use crate::helpers::*;
use crate::mock_agent::MockAgent;
use blogcrew::core::CrewConfig;
use blogcrew::output::OutputWriter;
use chrono::NaiveDate;
use regex::Regex;

#[tokio::test]
async fn test_batch_run_writes_both_files() {
    let mut pipeline = CrewConfig::batch().unwrap().to_pipeline().unwrap();
    pipeline.set_variable("topic", "Deep Sea Life");

    let agent = MockAgent::new(vec!["plan", "draft", "# Deep Sea Life\n\nAnglerfish glow."]);
    let result = run_pipeline_with_mock(pipeline, agent).await;
    let markdown = result.output.unwrap();

    let dir = temp_output_dir("batch");
    let paths = OutputWriter::new(&dir).write_now("Deep Sea Life", &markdown).unwrap();

    let name = Regex::new(r"^Deep_Sea_Life_\d{8}_\d{6}\.md$").unwrap();
    let file_name = paths.markdown.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.is_match(&file_name), "unexpected file name {}", file_name);
    assert_eq!(paths.html.with_extension("md"), paths.markdown);

    assert_eq!(std::fs::read_to_string(&paths.markdown).unwrap(), markdown);

    let html = std::fs::read_to_string(&paths.html).unwrap();
    let container = html.find("<div class=\"container\">").unwrap();
    let heading = html.find("<h1>Deep Sea Life</h1>").unwrap();
    let footer = html.find("<div class=\"footer\">").unwrap();
    assert!(container < heading && heading < footer);
    assert!(html.contains("<p>Anglerfish glow.</p>"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_distinct_timestamps_do_not_overwrite() {
    let dir = temp_output_dir("timestamps");
    let writer = OutputWriter::new(&dir);
    let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let first = writer
        .write("Tides", "first", &day.and_hms_opt(9, 0, 0).unwrap())
        .unwrap();
    let second = writer
        .write("Tides", "second", &day.and_hms_opt(9, 0, 1).unwrap())
        .unwrap();

    assert_ne!(first.markdown, second.markdown);
    assert_eq!(std::fs::read_to_string(&first.markdown).unwrap(), "first");
    assert_eq!(std::fs::read_to_string(&second.markdown).unwrap(), "second");
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 4);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_unsafe_topic_characters_stay_inside_output_dir() {
    let dir = temp_output_dir("unsafe");
    let timestamp = NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();

    let paths = OutputWriter::new(&dir)
        .write("AI/ML: What's next?", "body", &timestamp)
        .unwrap();

    assert_eq!(paths.markdown.parent().unwrap(), dir.as_path());
    assert_eq!(
        paths.markdown.file_name().unwrap().to_string_lossy(),
        "AI-ML-_What's_next-_20250601_123000.md"
    );

    std::fs::remove_dir_all(&dir).ok();
}
