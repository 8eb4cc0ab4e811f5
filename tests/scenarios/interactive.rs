//! Test: the interactive presenter path (writer → editor, then an image)

use crate::mock_agent::{MockAgent, MockImageSearch};
use blogcrew::core::{CrewConfig, Settings, SettingsError};
use blogcrew::presenter::{BlogRequest, ImageOutcome, Language, Presenter, PresenterError, Tone};
use std::sync::Arc;

fn presenter(agent: &MockAgent, images: &MockImageSearch) -> Presenter {
    Presenter::new(
        CrewConfig::interactive().unwrap(),
        Arc::new(agent.clone()),
        Arc::new(images.clone()),
    )
}

fn request(topic: &str) -> BlogRequest {
    BlogRequest {
        topic: topic.to_string(),
        tone: Tone::Casual,
        language: Language::Spanish,
    }
}

#[tokio::test]
async fn test_generate_returns_edited_post_and_image() {
    let agent = MockAgent::new(vec!["draft", "# Coffee\n\nEdited."]);
    let images = MockImageSearch::found("https://images.example/coffee.jpg");

    let presentation = presenter(&agent, &images)
        .generate(&request("  Coffee Culture "))
        .await
        .unwrap();

    assert_eq!(presentation.markdown, "# Coffee\n\nEdited.");
    assert_eq!(presentation.topic, "Coffee Culture");
    assert_eq!(presentation.image.url(), Some("https://images.example/coffee.jpg"));
    assert!(presentation.image_warning().is_none());
    assert_eq!(images.queries(), ["Coffee Culture"]);

    let requests = agent.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].prompt.contains("Write a Casual blog on Coffee Culture in Spanish."));
    assert!(requests[1].prompt.contains("draft"));
}

#[tokio::test]
async fn test_missing_image_produces_warning() {
    let agent = MockAgent::new(vec!["draft", "final"]);
    let images = MockImageSearch::not_found();

    let presentation = presenter(&agent, &images)
        .generate(&request("Obscure Topic"))
        .await
        .unwrap();

    assert_eq!(presentation.image, ImageOutcome::NotFound);
    assert_eq!(
        presentation.image_warning().as_deref(),
        Some("No related image found on Unsplash.")
    );
    assert_eq!(presentation.markdown, "final");
}

#[tokio::test]
async fn test_image_failure_keeps_the_finished_post() {
    let agent = MockAgent::new(vec!["draft", "# Bridges\n\nFinal text."]);
    let images = MockImageSearch::failing("dns failure");

    let presentation = presenter(&agent, &images)
        .generate(&request("Bridges"))
        .await
        .unwrap();

    assert_eq!(presentation.markdown, "# Bridges\n\nFinal text.");
    assert!(matches!(
        presentation.image,
        ImageOutcome::Failed { ref error } if error.contains("dns failure")
    ));
    assert!(presentation
        .image_warning()
        .is_some_and(|warning| warning.contains("dns failure")));
    assert_eq!(agent.calls(), 2);
    assert_eq!(images.queries(), ["Bridges"]);
}

#[tokio::test]
async fn test_repeated_requests_run_fresh_each_time() {
    let agent = MockAgent::new(vec!["d1", "f1", "d2", "f2"]);
    let images = MockImageSearch::not_found();
    let presenter = presenter(&agent, &images);

    let first = presenter.generate(&request("Same Topic")).await.unwrap();
    let second = presenter.generate(&request("Same Topic")).await.unwrap();

    assert_eq!(first.markdown, "f1");
    assert_eq!(second.markdown, "f2");
    assert_ne!(first.execution_id, second.execution_id);
    assert_eq!(agent.calls(), 4);
    assert_eq!(images.queries().len(), 2);
}

#[tokio::test]
async fn test_empty_topic_makes_no_calls() {
    let agent = MockAgent::new(vec!["unused"]);
    let images = MockImageSearch::not_found();

    let result = presenter(&agent, &images).generate(&request("   ")).await;

    assert!(matches!(result, Err(PresenterError::EmptyTopic)));
    assert_eq!(agent.calls(), 0);
    assert!(images.queries().is_empty());
}

#[test]
fn test_missing_credentials_stop_before_any_client() {
    let crew = CrewConfig::interactive().unwrap();

    let no_keys = Settings::default();
    assert!(matches!(
        Presenter::from_settings(&no_keys, crew.clone()),
        Err(PresenterError::Settings(SettingsError::MissingCredential("GROQ_API_KEY")))
    ));

    let llm_only = Settings::default().with_groq_api_key("gsk-test");
    assert!(matches!(
        Presenter::from_settings(&llm_only, crew.clone()),
        Err(PresenterError::Settings(SettingsError::MissingCredential("UNSPLASH_ACCESS_KEY")))
    ));

    let both = llm_only.with_unsplash_access_key("unsplash-test");
    assert!(Presenter::from_settings(&both, crew).is_ok());
}
