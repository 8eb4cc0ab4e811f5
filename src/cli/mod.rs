//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{BatchCommand, GenerateCommand, ServeCommand, ValidateCommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Multi-agent blog generator
#[derive(Debug, Parser, Clone)]
#[command(name = "blogcrew")]
#[command(author = "blogcrew contributors")]
#[command(version = "0.1.0")]
#[command(about = "Plan, write and edit blog posts with a crew of LLM agents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to settings YAML file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print each stage's output as it completes
    #[arg(short, long, global = true)]
    pub stream: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Plan, write and edit a post, saving Markdown and HTML
    Batch(BatchCommand),

    /// Serve the interactive web UI
    Serve(ServeCommand),

    /// Generate one post interactively in the terminal
    Generate(GenerateCommand),

    /// Validate a crew definition
    Validate(ValidateCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
