use crate::chunker::chunk_text;
use crate::client::InferenceBackend;
use crate::config::Config;
use crate::document::SourceDocument;
use crate::error::Result;
use crate::template::TemplateEngine;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// A finished output document ready to be written.
#[derive(Debug, Clone)]
pub struct CheatSheet {
    /// Output file name without the extension
    pub stem: String,

    /// Complete rendered Markdown
    pub markdown: String,

    /// Number of chunk blocks in the document
    pub blocks: usize,

    /// Blocks whose inference request failed
    pub failed_blocks: usize,
}

/// Turns one source document into a cheat sheet, chunk by chunk.
///
/// Each chunk becomes one inference request; the replies are rendered
/// into the output document in order. A failed request becomes an
/// inline notice instead of aborting the document.
pub struct Assembler {
    backend: Box<dyn InferenceBackend>,
    engine: TemplateEngine,
    banner: String,
    instruction: String,
    chunk_size: usize,
    pacing: Duration,
}

impl Assembler {
    /// Creates an assembler from the configuration and a backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the output template cannot be loaded.
    pub fn new(config: &Config, backend: Box<dyn InferenceBackend>) -> Result<Self> {
        Ok(Self {
            backend,
            engine: TemplateEngine::new(config)?,
            banner: config.banner(),
            instruction: config.instruction.clone(),
            chunk_size: config.chunk_size,
            pacing: config.pacing,
        })
    }

    /// Number of chunks the document splits into.
    #[must_use]
    pub fn chunk_count(&self, document: &SourceDocument) -> usize {
        chunk_text(&document.content, self.chunk_size).len()
    }

    /// Converts one document, calling the backend once per chunk.
    ///
    /// # Errors
    ///
    /// Returns an error if the output document cannot be rendered.
    /// Backend failures do not error; they appear inline in the output.
    pub fn assemble(&self, document: &SourceDocument) -> Result<CheatSheet> {
        let chunks = chunk_text(&document.content, self.chunk_size);
        debug!("Converting '{}' in {} chunk(s)", document.stem, chunks.len());

        let mut blocks = Vec::with_capacity(chunks.len());
        let mut failed_blocks = 0;

        for (index, chunk) in chunks.iter().enumerate() {
            // Pace requests so the local backend is not hit in a tight loop.
            if !self.pacing.is_zero() {
                thread::sleep(self.pacing);
            }

            let prompt = format!("{}\n{}", self.instruction, chunk);
            let outcome = self.backend.generate(&prompt);

            if outcome.is_failure() {
                failed_blocks += 1;
                warn!(
                    "Chunk {}/{} of '{}' failed",
                    index + 1,
                    chunks.len(),
                    document.stem
                );
            }

            blocks.push(outcome.into_block());
        }

        let markdown = self.engine.render(&self.banner, &blocks)?;

        Ok(CheatSheet {
            stem: document.stem.clone(),
            markdown,
            blocks: blocks.len(),
            failed_blocks,
        })
    }
}
