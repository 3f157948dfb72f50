//! # cheatmark
//!
//! A batch converter that turns directories of plain-text notes into
//! Markdown cheat sheets using a local Ollama server.
//!
//! ## Features
//!
//! - Non-recursive directory scanning with a configurable extension
//! - Fixed-size character chunking so every request fits the context window
//! - One blocking request per chunk with paced delivery
//! - Failed requests become inline notices instead of aborting the run
//! - Atomic file writes into the output directory
//!
//! ## Quick Start
//!
//! ```no_run
//! use cheatmark::{Config, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .input_dir("./notes")
//!     .output_dir("./cheatsheets")
//!     .model("deepseek-coder-v2")
//!     .build()?;
//!
//! Pipeline::new(config)?.run()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library follows a pipeline architecture:
//! 1. **Scanner**: Discovers input files in the input directory
//! 2. **Chunker**: Splits each file into fixed-size character chunks
//! 3. **Client**: Sends one request per chunk to the inference backend
//! 4. **Assembler**: Renders the replies into one Markdown document
//! 5. **Writer**: Persists the document into the output directory

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod assembler;
mod chunker;
mod client;
mod config;
mod document;
mod error;
mod pipeline;
mod scanner;
mod template;
mod writer;

pub mod api;

pub use assembler::{Assembler, CheatSheet};
pub use chunker::chunk_text;
pub use client::{InferenceBackend, InferenceResult, OllamaClient, NO_RESPONSE};
pub use config::{Config, ConfigBuilder};
pub use document::{read_source, SourceDocument};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineStats};

/// Runs the complete conversion pipeline with the given configuration.
///
/// This is the main entry point for the library.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The input directory doesn't exist or is inaccessible
/// - The HTTP client cannot be constructed
/// - The output template cannot be loaded
///
/// # Examples
///
/// ```no_run
/// use cheatmark::{run, Config};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::builder()
///     .input_dir("./notes")
///     .build()?;
///
/// run(config)?;
/// # Ok(())
/// # }
/// ```
pub fn run(config: Config) -> Result<PipelineStats> {
    Pipeline::new(config)?.run()
}
