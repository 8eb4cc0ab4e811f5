//! Related-image lookup through the Unsplash random-photo API

use crate::core::settings::ImageSettings;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image search request failed: {0}")]
    Http(String),

    #[error("Image search timed out after {0} seconds")]
    Timeout(u64),

    #[error("Image search returned an unreadable body: {0}")]
    Decode(String),
}

/// Result of one image lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// An image URL was found
    Found { url: String },
    /// The response carried no usable image URL
    NotFound,
    /// The lookup itself failed; the blog is still shown
    Failed { error: String },
}

impl ImageOutcome {
    pub fn url(&self) -> Option<&str> {
        match self {
            ImageOutcome::Found { url } => Some(url),
            ImageOutcome::NotFound | ImageOutcome::Failed { .. } => None,
        }
    }
}

/// Finds one image related to a query
#[async_trait]
pub trait ImageSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<ImageOutcome, ImageError>;
}

/// Pull `urls.regular` out of an Unsplash photo body
pub fn extract_image_url(body: &serde_json::Value) -> Option<String> {
    body.get("urls")
        .and_then(|urls| urls.get("regular"))
        .and_then(|url| url.as_str())
        .filter(|url| !url.trim().is_empty())
        .map(str::to_string)
}

/// Unsplash client
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
    timeout_secs: u64,
}

impl UnsplashClient {
    pub fn new(settings: &ImageSettings, access_key: impl Into<String>) -> Result<Self, ImageError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ImageError::Http(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            access_key: access_key.into(),
            timeout_secs: settings.timeout_secs,
        })
    }

    /// Request URL for a query; contains the access key, never log it
    fn request_url(&self, query: &str) -> String {
        format!(
            "{}?query={}&client_id={}",
            self.endpoint,
            urlencoding::encode(query),
            urlencoding::encode(&self.access_key)
        )
    }
}

#[async_trait]
impl ImageSearch for UnsplashClient {
    async fn search(&self, query: &str) -> Result<ImageOutcome, ImageError> {
        debug!("Searching images for: {}", query);

        let response = self
            .client
            .get(self.request_url(query))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ImageError::Timeout(self.timeout_secs)
                } else {
                    ImageError::Http(e.without_url().to_string())
                }
            })?;

        // Error responses still carry a JSON body; only its shape matters here.
        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ImageError::Decode(e.without_url().to_string()))?;

        match extract_image_url(&body) {
            Some(url) => Ok(ImageOutcome::Found { url }),
            None => {
                warn!("No image URL in image search response (HTTP {})", status);
                Ok(ImageOutcome::NotFound)
            }
        }
    }
}
