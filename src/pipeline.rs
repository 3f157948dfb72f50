use crate::assembler::Assembler;
use crate::client::{InferenceBackend, OllamaClient};
use crate::config::Config;
use crate::document::read_source;
use crate::error::Result;
use crate::scanner::Scanner;
use crate::writer::Writer;
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Statistics collected during a conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    /// Input files found by the scanner
    pub files_found: usize,

    /// Files converted and written
    pub files_converted: usize,

    /// Files skipped because they could not be read or written
    pub files_failed: usize,

    /// Chunks sent to the backend across all files
    pub total_chunks: usize,

    /// Requests that failed and were inlined as error notices
    pub failed_calls: usize,

    /// Total execution time
    pub duration: Duration,

    /// Output directory path
    pub output_directory: String,
}

impl PipelineStats {
    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║              Conversion Run Summary                   ║");
        println!("╠═══════════════════════════════════════════════════════╣");
        println!(
            "║ Files Found:          {:>8}                        ║",
            self.files_found
        );
        println!(
            "║ Files Converted:      {:>8}                        ║",
            self.files_converted
        );
        println!(
            "║ Files Failed:         {:>8}                        ║",
            self.files_failed
        );
        println!("║                                                       ║");
        println!(
            "║ Chunks Sent:          {:>8}                        ║",
            self.total_chunks
        );
        println!(
            "║ Failed Requests:      {:>8}                        ║",
            self.failed_calls
        );
        println!("║                                                       ║");
        println!("║ Output Directory:                                     ║");
        println!(
            "║   {}                                              ║",
            self.output_directory
        );
        println!(
            "║ Total Time:           {:>8.2}s                     ║",
            self.duration.as_secs_f64()
        );
        println!("╚═══════════════════════════════════════════════════════╝\n");
    }
}

struct FileOutcome {
    chunks: usize,
    failed_calls: usize,
    written: bool,
}

/// Main orchestrator for converting a directory of notes.
pub struct Pipeline {
    config: Config,
    scanner: Scanner,
    assembler: Assembler,
    writer: Writer,
}

impl Pipeline {
    /// Creates a pipeline backed by the configured HTTP endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - The HTTP client cannot be constructed
    /// - The output template cannot be loaded
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let backend = OllamaClient::new(&config)?;
        Self::from_parts(config, Box::new(backend))
    }

    /// Creates a pipeline with a caller-supplied backend.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails or the output
    /// template cannot be loaded.
    pub fn with_backend(config: Config, backend: Box<dyn InferenceBackend>) -> Result<Self> {
        config.validate()?;
        Self::from_parts(config, backend)
    }

    fn from_parts(config: Config, backend: Box<dyn InferenceBackend>) -> Result<Self> {
        let scanner = Scanner::new(&config);
        let assembler = Assembler::new(&config, backend)?;
        let writer = Writer::new(&config);

        Ok(Self {
            config,
            scanner,
            assembler,
            writer,
        })
    }

    /// Executes the complete conversion run and returns statistics.
    ///
    /// # Process
    ///
    /// 1. **Scan**: Discovers input files in the input directory
    /// 2. **Convert**: Chunks each file, queries the backend, writes the
    ///    rendered cheat sheet
    ///
    /// A file that cannot be read or written is logged and skipped; the
    /// run continues with the next file.
    ///
    /// # Errors
    ///
    /// Returns an error if a stage fails critically.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cheatmark::{Config, Pipeline};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder()
    ///     .input_dir("./notes")
    ///     .output_dir("./cheatsheets")
    ///     .build()?;
    ///
    /// let stats = Pipeline::new(config)?.run()?;
    /// stats.print_summary();
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(input_dir = %self.config.input_dir.display()))]
    pub fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        info!("Starting conversion run");

        // Stage 1: Scanning
        info!("Stage 1/2: Scanning for input files...");
        let files = self.scanner.scan();

        if files.is_empty() {
            warn!(
                "No *.{} files found in {}",
                self.config.extension,
                self.config.input_dir.display()
            );
            return Ok(PipelineStats {
                files_found: 0,
                files_converted: 0,
                files_failed: 0,
                total_chunks: 0,
                failed_calls: 0,
                duration: start_time.elapsed(),
                output_directory: self.config.output_dir.display().to_string(),
            });
        }

        info!("✓ Found {} file(s)", files.len());

        // Stage 2: Converting
        info!("Stage 2/2: Converting files...");
        let mut files_converted = 0;
        let mut files_failed = 0;
        let mut total_chunks = 0;
        let mut failed_calls = 0;

        for path in &files {
            match self.process_file(path) {
                Ok(outcome) => {
                    if outcome.written {
                        files_converted += 1;
                    }
                    total_chunks += outcome.chunks;
                    failed_calls += outcome.failed_calls;
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    files_failed += 1;
                }
            }
        }

        if self.config.dry_run {
            warn!("Dry run mode enabled - no files were written");
        }

        let duration = start_time.elapsed();
        info!(
            "✓ Converted {}/{} file(s) in {:.2}s",
            files_converted,
            files.len(),
            duration.as_secs_f64()
        );

        Ok(PipelineStats {
            files_found: files.len(),
            files_converted,
            files_failed,
            total_chunks,
            failed_calls,
            duration,
            output_directory: self.config.output_dir.display().to_string(),
        })
    }

    /// Converts a single input file.
    fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let document = read_source(path)?;

        if self.config.dry_run {
            let chunks = self.assembler.chunk_count(&document);
            info!(
                "Would convert {} -> {} ({} chunk(s))",
                path.display(),
                self.writer.output_path(&document.stem).display(),
                chunks
            );
            return Ok(FileOutcome {
                chunks,
                failed_calls: 0,
                written: false,
            });
        }

        let sheet = self.assembler.assemble(&document)?;
        self.writer.write(&sheet)?;

        Ok(FileOutcome {
            chunks: sheet.blocks,
            failed_calls: sheet.failed_blocks,
            written: true,
        })
    }
}
