//! Axum web UI for the interactive pipeline

use crate::presenter::{
    options::{Language, Tone},
    page,
    session::{BlogRequest, Presenter, PresenterError},
};
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

/// Shared state accessible from Axum handlers
#[derive(Clone)]
pub struct AppState {
    pub presenter: Arc<Presenter>,
}

/// Fields posted by the form
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    pub topic: String,
    pub tone: Tone,
    pub language: Language,
}

impl From<GenerateForm> for BlogRequest {
    fn from(form: GenerateForm) -> Self {
        BlogRequest {
            topic: form.topic,
            tone: form.tone,
            language: form.language,
        }
    }
}

/// Build the router
pub fn router(presenter: Arc<Presenter>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/generate", post(generate_handler))
        .route("/health", get(health_handler))
        .with_state(AppState { presenter })
}

/// Bind and serve until the process is stopped
pub async fn serve(addr: SocketAddr, presenter: Arc<Presenter>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Blog generator UI listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(presenter)).await
}

/// GET /
async fn index_handler() -> Html<String> {
    Html(page::render_form(&BlogRequest::default()))
}

/// POST /generate: blocks until the whole pipeline and image lookup finish
async fn generate_handler(State(state): State<AppState>, Form(form): Form<GenerateForm>) -> Response {
    let request = BlogRequest::from(form);

    match state.presenter.generate(&request).await {
        Ok(presentation) => {
            info!("Run {} finished for: {}", presentation.execution_id, presentation.topic);
            Html(page::render_presentation(&request, &presentation)).into_response()
        }
        Err(e) => {
            error!("Blog generation failed: {}", e);
            let status = match e {
                PresenterError::EmptyTopic => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Html(page::render_error(&request, &e.to_string()))).into_response()
        }
    }
}

/// GET /health
async fn health_handler() -> &'static str {
    "ok"
}
