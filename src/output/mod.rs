//! Batch output: Markdown and HTML files

pub mod html;
pub mod writer;

pub use writer::{output_stem, OutputError, OutputPaths, OutputWriter, TIMESTAMP_FORMAT};
