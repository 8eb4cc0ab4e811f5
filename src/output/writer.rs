//! Writes the final blog post to timestamped Markdown and HTML files

use crate::output::html;
use chrono::{Local, NaiveDateTime};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

/// Timestamp format used in output file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Paths of the files written for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub markdown: PathBuf,
    pub html: PathBuf,
}

fn unsafe_filename_chars() -> &'static Regex {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    UNSAFE.get_or_init(|| Regex::new(r#"[/\\:*?"<>|]"#).expect("static regex"))
}

/// File stem for a topic and timestamp: `<topic_with_underscores>_<YYYYMMDD_HHMMSS>`
pub fn output_stem(topic: &str, timestamp: &NaiveDateTime) -> String {
    let topic = topic.trim().replace(' ', "_");
    let topic = unsafe_filename_chars().replace_all(&topic, "-");
    format!("{}_{}", topic, timestamp.format(TIMESTAMP_FORMAT))
}

/// Writes run results into a fixed output directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write using the current local time
    pub fn write_now(&self, topic: &str, markdown: &str) -> Result<OutputPaths, OutputError> {
        self.write(topic, markdown, &Local::now().naive_local())
    }

    /// Write `<stem>.md` and `<stem>.html`, creating the directory if needed
    pub fn write(
        &self,
        topic: &str,
        markdown: &str,
        timestamp: &NaiveDateTime,
    ) -> Result<OutputPaths, OutputError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| OutputError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let stem = output_stem(topic, timestamp);
        let paths = OutputPaths {
            markdown: self.dir.join(format!("{}.md", stem)),
            html: self.dir.join(format!("{}.html", stem)),
        };

        write_file(&paths.markdown, markdown)?;
        info!("Markdown output saved to: {}", paths.markdown.display());

        let document = html::render_document(topic, &html::markdown_to_html(markdown));
        write_file(&paths.html, &document)?;
        info!("HTML output saved to: {}", paths.html.display());

        Ok(paths)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), OutputError> {
    std::fs::write(path, contents).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}
