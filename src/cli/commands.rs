//! CLI command definitions

use crate::presenter::{Language, Tone, DEFAULT_TOPIC};
use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Plan, write and edit one blog post, then save it as Markdown and HTML
#[derive(Debug, Args, Clone)]
pub struct BatchCommand {
    /// Blog topic (defaults to the crew's `topic` variable)
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Directory for the generated files (overrides the settings file)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Crew definition YAML (defaults to the built-in planner/writer/editor crew)
    #[arg(long)]
    pub crew: Option<PathBuf>,

    /// Prompt variable overrides (key=value)
    #[arg(long, value_parser = parse_key_value)]
    pub variable: Vec<(String, String)>,
}

/// Start the web UI
#[derive(Debug, Args, Clone)]
pub struct ServeCommand {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8501")]
    pub bind: SocketAddr,

    /// Crew definition YAML (defaults to the built-in writer/editor crew)
    #[arg(long)]
    pub crew: Option<PathBuf>,
}

/// Write and edit one blog post in the terminal, with a suggested image
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Blog topic
    #[arg(short, long, default_value = DEFAULT_TOPIC)]
    pub topic: String,

    /// Writing tone
    #[arg(long, value_enum, default_value_t = ToneArg::Professional)]
    pub tone: ToneArg,

    /// Output language
    #[arg(long, value_enum, default_value_t = LanguageArg::English)]
    pub language: LanguageArg,

    /// Crew definition YAML (defaults to the built-in writer/editor crew)
    #[arg(long)]
    pub crew: Option<PathBuf>,
}

/// Validate a crew definition
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to crew YAML file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Tone argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ToneArg {
    Professional,
    Casual,
    Inspirational,
    Technical,
}

impl From<ToneArg> for Tone {
    fn from(arg: ToneArg) -> Self {
        match arg {
            ToneArg::Professional => Tone::Professional,
            ToneArg::Casual => Tone::Casual,
            ToneArg::Inspirational => Tone::Inspirational,
            ToneArg::Technical => Tone::Technical,
        }
    }
}

/// Language argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LanguageArg {
    English,
    French,
    Spanish,
    German,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::English => Language::English,
            LanguageArg::French => Language::French,
            LanguageArg::Spanish => Language::Spanish,
            LanguageArg::German => Language::German,
        }
    }
}

/// Parse key=value pairs
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("Invalid key=value pair: {}", s)),
    }
}
