//! One interactive generation: writer → editor, then a related image

use crate::{
    agent::{AgentError, AgentExecutor, GroqClient},
    core::{CrewConfig, Settings, SettingsError},
    execution::{EventHandler, ExecutionEngine, ExecutionError, ExecutionEvent},
    presenter::{
        image::{ImageError, ImageOutcome, ImageSearch, UnsplashClient},
        options::{Language, Tone},
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Topic shown in the form before the user types anything
pub const DEFAULT_TOPIC: &str = "Artificial Intelligence in Education";

#[derive(Debug, Error)]
pub enum PresenterError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Failed to set up LLM client: {0}")]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("Invalid crew definition: {0}")]
    Crew(anyhow::Error),

    #[error("Topic must not be empty")]
    EmptyTopic,
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogRequest {
    pub topic: String,
    pub tone: Tone,
    pub language: Language,
}

impl Default for BlogRequest {
    fn default() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            tone: Tone::default(),
            language: Language::default(),
        }
    }
}

/// What gets displayed after a run
#[derive(Debug, Clone)]
pub struct Presentation {
    pub execution_id: Uuid,
    pub topic: String,
    pub markdown: String,
    pub image: ImageOutcome,
}

impl Presentation {
    /// Warning shown when no image could be found
    pub fn image_warning(&self) -> Option<String> {
        match &self.image {
            ImageOutcome::Found { .. } => None,
            ImageOutcome::NotFound => Some("No related image found on Unsplash.".to_string()),
            ImageOutcome::Failed { error } => Some(format!("Could not fetch an image: {}", error)),
        }
    }
}

/// Runs the interactive pipeline; every call is a fresh run
pub struct Presenter {
    crew: CrewConfig,
    agent: Arc<dyn AgentExecutor>,
    images: Arc<dyn ImageSearch>,
    event_handlers: Vec<EventHandler>,
}

impl Presenter {
    pub fn new(crew: CrewConfig, agent: Arc<dyn AgentExecutor>, images: Arc<dyn ImageSearch>) -> Self {
        Self {
            crew,
            agent,
            images,
            event_handlers: Vec::new(),
        }
    }

    /// Build the live clients; both credentials are checked before any client exists
    pub fn from_settings(settings: &Settings, crew: CrewConfig) -> Result<Self, PresenterError> {
        settings.require_groq_api_key()?;
        let unsplash_key = settings.require_unsplash_access_key()?;

        let agent = GroqClient::new(settings.interactive_agent_config()?)?;
        let images = UnsplashClient::new(&settings.images, unsplash_key)?;
        Ok(Self::new(crew, Arc::new(agent), Arc::new(images)))
    }

    /// Register a handler that receives every run's execution events
    pub fn on_event<F>(mut self, handler: F) -> Self
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
        self
    }

    /// Run writer → editor for the request, then look up an image for the topic
    pub async fn generate(&self, request: &BlogRequest) -> Result<Presentation, PresenterError> {
        let topic = request.topic.trim();
        if topic.is_empty() {
            return Err(PresenterError::EmptyTopic);
        }

        let mut pipeline = self.crew.to_pipeline().map_err(PresenterError::Crew)?;
        pipeline.set_variable("topic", topic);
        pipeline.set_variable("tone", request.tone.as_str());
        pipeline.set_variable("language", request.language.as_str());

        let mut engine = ExecutionEngine::new(self.agent.clone());
        for handler in &self.event_handlers {
            let handler = handler.clone();
            engine.add_event_handler(move |event| handler(event));
        }

        info!(
            "Generating {} blog in {} on: {}",
            request.tone, request.language, topic
        );
        let markdown = engine.execute(&mut pipeline).await?;

        // The post is finished at this point; an image failure must not discard it.
        let image = match self.images.search(topic).await {
            Ok(ImageOutcome::NotFound) => {
                warn!("No related image found for: {}", topic);
                ImageOutcome::NotFound
            }
            Ok(image) => image,
            Err(e) => {
                warn!("Image search failed for {}: {}", topic, e);
                ImageOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        Ok(Presentation {
            execution_id: pipeline.state.execution_id,
            topic: topic.to_string(),
            markdown,
            image,
        })
    }
}
