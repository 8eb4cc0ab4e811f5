//! Runtime settings: credentials from the environment, tunables from YAML
//!
//! Every component receives a `Settings` value explicitly; nothing else in
//! the crate reads the process environment.

use crate::agent::{client, AgentClientConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable holding the LLM provider key
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";

/// Environment variable holding the image search key
pub const UNSPLASH_ACCESS_KEY_VAR: &str = "UNSPLASH_ACCESS_KEY";

/// Default image search endpoint
pub const DEFAULT_IMAGE_ENDPOINT: &str = "https://api.unsplash.com/photos/random";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Missing {0} (set it in the environment or a .env file)")]
    MissingCredential(&'static str),

    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// LLM tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        let defaults = AgentClientConfig::default();
        Self {
            endpoint: client::DEFAULT_ENDPOINT.to_string(),
            model: client::DEFAULT_MODEL.to_string(),
            temperature: defaults.temperature,
            timeout_secs: defaults.timeout_secs,
        }
    }
}

/// Image search tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_IMAGE_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Non-secret settings that may come from a YAML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub llm: LlmSettings,
    /// LLM used by the interactive crew; falls back to `llm` when absent
    pub interactive_llm: Option<LlmSettings>,
    pub images: ImageSettings,
    pub output_dir: Option<PathBuf>,
}

impl SettingsFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Fully resolved settings passed to every pipeline
#[derive(Clone)]
pub struct Settings {
    pub groq_api_key: Option<String>,
    pub unsplash_access_key: Option<String>,
    pub llm: LlmSettings,
    pub interactive_llm: Option<LlmSettings>,
    pub images: ImageSettings,
    pub output_dir: PathBuf,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "<redacted>"))
            .field(
                "unsplash_access_key",
                &self.unsplash_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("llm", &self.llm)
            .field("interactive_llm", &self.interactive_llm)
            .field("images", &self.images)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_parts(SettingsFile::default(), |_| None)
    }
}

impl Settings {
    /// Load `.env`, the optional settings file, and credentials from the environment
    pub fn load(settings_file: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = env_file(dotenvy::dotenv()) {
            debug!("Loaded environment from {}", path.display());
        }

        let file = match settings_file {
            Some(path) => SettingsFile::from_file(path)?,
            None => SettingsFile::default(),
        };

        Ok(Self::from_parts(file, |name| std::env::var(name).ok()))
    }

    /// Build settings from a settings file and an environment lookup
    pub fn from_parts<F>(file: SettingsFile, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            groq_api_key: credential(GROQ_API_KEY_VAR),
            unsplash_access_key: credential(UNSPLASH_ACCESS_KEY_VAR),
            llm: file.llm,
            interactive_llm: file.interactive_llm,
            images: file.images,
            output_dir: file.output_dir.unwrap_or_else(|| PathBuf::from("outputs")),
        }
    }

    pub fn with_groq_api_key(mut self, key: impl Into<String>) -> Self {
        self.groq_api_key = Some(key.into());
        self
    }

    pub fn with_unsplash_access_key(mut self, key: impl Into<String>) -> Self {
        self.unsplash_access_key = Some(key.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn require_groq_api_key(&self) -> Result<&str, SettingsError> {
        self.groq_api_key
            .as_deref()
            .ok_or(SettingsError::MissingCredential(GROQ_API_KEY_VAR))
    }

    pub fn require_unsplash_access_key(&self) -> Result<&str, SettingsError> {
        self.unsplash_access_key
            .as_deref()
            .ok_or(SettingsError::MissingCredential(UNSPLASH_ACCESS_KEY_VAR))
    }

    /// Agent client configuration for the batch crew; requires the LLM key
    pub fn agent_config(&self) -> Result<AgentClientConfig, SettingsError> {
        self.client_config(&self.llm)
    }

    /// Agent client configuration for the interactive crew; requires the LLM key
    pub fn interactive_agent_config(&self) -> Result<AgentClientConfig, SettingsError> {
        self.client_config(self.interactive_llm.as_ref().unwrap_or(&self.llm))
    }

    fn client_config(&self, llm: &LlmSettings) -> Result<AgentClientConfig, SettingsError> {
        let key = self.require_groq_api_key()?;
        Ok(AgentClientConfig::new()
            .with_endpoint(llm.endpoint.clone())
            .with_api_key(key.to_string())
            .with_model(llm.model.clone())
            .with_temperature(llm.temperature)
            .with_timeout(llm.timeout_secs))
    }
}

/// Path of the loaded `.env` file; a missing file is normal, a broken one is reported
fn env_file(result: Result<PathBuf, dotenvy::Error>) -> Option<PathBuf> {
    match result {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => {
            warn!("Ignoring unreadable .env file: {}", e);
            None
        }
    }
}
