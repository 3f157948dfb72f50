//! # Quick Start API
//!
//! High-level, ergonomic API for common use cases. Start here if you want
//! results fast without configuration overhead.
//!
//! ## Examples
//!
//! ```no_run
//! use cheatmark::api::Convert;
//!
//! // Simplest usage - convert ./notes into ./out
//! Convert::dir("./notes").run()?;
//!
//! // Custom configuration
//! Convert::dir("./notes")
//!     .output("./cheatsheets")
//!     .model("llama3")
//!     .chunk_size(2048)
//!     .no_pacing()
//!     .run()?;
//! # Ok::<(), cheatmark::Error>(())
//! ```

use crate::{Config, Pipeline, PipelineStats, Result};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Core API
// ============================================================================

/// Entry point for the Quick Start API.
///
/// Builds and executes conversions with a fluent interface.
///
/// # Examples
///
/// ```no_run
/// use cheatmark::api::Convert;
///
/// // Basic usage
/// Convert::dir("./notes").run()?;
///
/// // With configuration
/// Convert::dir("./notes")
///     .output("./cheatsheets")
///     .model("llama3")
///     .run()?;
/// # Ok::<(), cheatmark::Error>(())
/// ```
#[derive(Debug, Clone)]
#[must_use = "call .run() to execute the conversion"]
pub struct Convert {
    input: PathBuf,
    output: PathBuf,
    model: Option<String>,
    api_url: Option<String>,
    chunk_size: Option<usize>,
    pacing: Option<Duration>,
    instruction: Option<String>,
    extension: Option<String>,
    dry_run: bool,
}

impl Default for Convert {
    fn default() -> Self {
        Self {
            input: PathBuf::from("."),
            output: PathBuf::from("out"),
            model: None,
            api_url: None,
            chunk_size: None,
            pacing: None,
            instruction: None,
            extension: None,
            dry_run: false,
        }
    }
}

impl Convert {
    /// Start a conversion of the current directory.
    pub fn current_dir() -> Self {
        Self::default()
    }

    /// Start a conversion of the specified directory.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cheatmark::api::Convert;
    ///
    /// Convert::dir("./notes").run()?;
    /// # Ok::<(), cheatmark::Error>(())
    /// ```
    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self {
            input: path.into(),
            ..Self::default()
        }
    }

    /// Set the output directory for generated files.
    ///
    /// Default: `out`
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Set the model requested from the backend.
    ///
    /// Default: `deepseek-coder-v2`
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the inference API endpoint URL.
    ///
    /// Default: `http://localhost:11434/api/generate`
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the maximum characters per chunk.
    ///
    /// Default: `1024`
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = Some(size);
        self
    }

    /// Set the pause before each request.
    ///
    /// Default: 2 seconds
    pub fn pacing(mut self, pacing: Duration) -> Self {
        self.pacing = Some(pacing);
        self
    }

    /// Disable the pause before each request.
    pub fn no_pacing(self) -> Self {
        self.pacing(Duration::ZERO)
    }

    /// Set the instruction prepended to every chunk.
    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Set the input file extension (without the dot).
    ///
    /// Default: `txt`
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Scan and report without calling the backend or writing files.
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Execute the conversion and return statistics.
    ///
    /// This is a terminal operation that consumes the builder.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input directory doesn't exist
    /// - Configuration is invalid
    /// - The HTTP client cannot be constructed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cheatmark::api::Convert;
    ///
    /// let stats = Convert::dir("./notes").run()?;
    ///
    /// println!(
    ///     "Converted {} files in {:.2}s",
    ///     stats.files_converted,
    ///     stats.duration.as_secs_f64()
    /// );
    /// # Ok::<(), cheatmark::Error>(())
    /// ```
    pub fn run(self) -> Result<PipelineStats> {
        let config = self.build_config()?;
        Pipeline::new(config)?.run()
    }

    fn build_config(self) -> Result<Config> {
        let mut builder = Config::builder()
            .input_dir(self.input)
            .output_dir(self.output)
            .dry_run(self.dry_run);

        if let Some(model) = self.model {
            builder = builder.model(model);
        }

        if let Some(url) = self.api_url {
            builder = builder.api_url(url);
        }

        if let Some(size) = self.chunk_size {
            builder = builder.chunk_size(size);
        }

        if let Some(pacing) = self.pacing {
            builder = builder.pacing(pacing);
        }

        if let Some(instruction) = self.instruction {
            builder = builder.instruction(instruction);
        }

        if let Some(extension) = self.extension {
            builder = builder.extension(extension);
        }

        builder.build()
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Convert a directory of notes with default settings.
///
/// This is the simplest way to use the library.
///
/// # Errors
///
/// Returns an error if the conversion cannot be set up.
///
/// # Examples
///
/// ```no_run
/// use cheatmark::api::convert_dir;
///
/// let stats = convert_dir("./notes", "./cheatsheets")?;
/// println!("Converted {} files", stats.files_converted);
/// # Ok::<(), cheatmark::Error>(())
/// ```
pub fn convert_dir(
    input: impl Into<PathBuf>,
    output: impl Into<PathBuf>,
) -> Result<PipelineStats> {
    Convert::dir(input).output(output).run()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_builder_has_sensible_defaults() {
        let convert = Convert::current_dir();
        assert_eq!(convert.input, PathBuf::from("."));
        assert_eq!(convert.output, PathBuf::from("out"));
        assert!(convert.model.is_none());
        assert!(!convert.dry_run);
    }

    #[test]
    fn convert_builder_is_fluent() {
        let convert = Convert::dir("./notes")
            .output("./custom-out")
            .model("llama3")
            .chunk_size(2048)
            .no_pacing()
            .dry_run();

        assert_eq!(convert.input, PathBuf::from("./notes"));
        assert_eq!(convert.output, PathBuf::from("./custom-out"));
        assert_eq!(convert.model.as_deref(), Some("llama3"));
        assert_eq!(convert.chunk_size, Some(2048));
        assert_eq!(convert.pacing, Some(Duration::ZERO));
        assert!(convert.dry_run);
    }

    #[test]
    fn run_on_empty_directory_succeeds() {
        let temp = assert_fs::TempDir::new().unwrap();

        let stats = Convert::dir(temp.path())
            .output(temp.path().join("out"))
            .no_pacing()
            .run()
            .unwrap();

        assert_eq!(stats.files_found, 0);
        assert_eq!(stats.files_converted, 0);
    }

    #[test]
    fn convert_dir_helper_runs() {
        let temp = assert_fs::TempDir::new().unwrap();

        let stats = convert_dir(temp.path(), temp.path().join("out")).unwrap();
        assert_eq!(stats.files_found, 0);
    }

    #[test]
    fn invalid_input_directory_is_rejected() {
        let err = Convert::dir("/definitely/not/a/real/dir").run();
        assert!(err.is_err());
    }
}
