use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:11434/api/generate";
const DEFAULT_MODEL: &str = "deepseek-coder-v2";
const DEFAULT_CHUNK_SIZE: usize = 1024;
const DEFAULT_NUM_CTX: u32 = 2048;
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_PACING_SECS: u64 = 2;
const DEFAULT_EXTENSION: &str = "txt";
const DEFAULT_INSTRUCTION: &str =
    "Summarize the following notes as a concise Markdown cheat sheet.";

/// Configuration for a conversion run.
///
/// Use [`Config::builder`] to construct:
///
/// ```
/// use cheatmark::Config;
///
/// let config = Config::builder()
///     .input_dir(".")
///     .output_dir("cheatsheets")
///     .model("llama3")
///     .build()
///     .unwrap();
/// assert_eq!(config.model, "llama3");
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Directory scanned for input files (non-recursive)
    pub input_dir: PathBuf,

    /// Directory the generated Markdown files are written to
    pub output_dir: PathBuf,

    /// Input file extension, without the dot
    pub extension: String,

    /// Inference API endpoint URL
    pub api_url: String,

    /// Model name sent with every request
    pub model: String,

    /// Maximum characters per chunk
    pub chunk_size: usize,

    /// Context window requested from the backend
    pub num_ctx: u32,

    /// Per-request timeout
    pub timeout: Duration,

    /// Pause before each request; zero disables pacing
    pub pacing: Duration,

    /// Instruction prepended to every chunk
    pub instruction: String,

    /// Extra HTTP headers sent with every request
    pub extra_headers: Vec<(String, String)>,

    /// Optional template file overriding the embedded one
    pub template_path: Option<PathBuf>,

    /// Scan and report without calling the backend or writing files
    pub dry_run: bool,
}

impl Config {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The heading line placed at the top of every generated file.
    #[must_use]
    pub fn banner(&self) -> String {
        format!(
            "##### Cheat sheet generated automatically via Ollama ({})",
            self.model
        )
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the input directory does not exist, the chunk
    /// size is zero, or any other field is out of range.
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.exists() {
            return Err(Error::config(format!(
                "Input directory does not exist: {}",
                self.input_dir.display()
            )));
        }

        if !self.input_dir.is_dir() {
            return Err(Error::config(format!(
                "Input path is not a directory: {}",
                self.input_dir.display()
            )));
        }

        if self.chunk_size == 0 {
            return Err(Error::config("Chunk size must be greater than zero"));
        }

        if self.num_ctx == 0 {
            return Err(Error::config("Context window must be greater than zero"));
        }

        if self.timeout.is_zero() {
            return Err(Error::config("Request timeout must be greater than zero"));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(Error::config(format!(
                "API URL must start with http:// or https://: {}",
                self.api_url
            )));
        }

        if self.extension.is_empty() {
            return Err(Error::config("Extension must not be empty"));
        }

        if self.extension.starts_with('.') {
            return Err(Error::config(format!(
                "Extension must not include the dot: {}",
                self.extension
            )));
        }

        if self.model.is_empty() {
            return Err(Error::config("Model name must not be empty"));
        }

        for (name, _) in &self.extra_headers {
            if name.is_empty() {
                return Err(Error::config("Header name must not be empty"));
            }
        }

        if let Some(path) = &self.template_path {
            if !path.is_file() {
                return Err(Error::config(format!(
                    "Template file does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("out"),
            extension: DEFAULT_EXTENSION.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            num_ctx: DEFAULT_NUM_CTX,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pacing: Duration::from_secs(DEFAULT_PACING_SECS),
            instruction: DEFAULT_INSTRUCTION.to_string(),
            extra_headers: Vec::new(),
            template_path: None,
            dry_run: false,
        }
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Sets the input directory.
    #[must_use]
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Sets the input file extension (without the dot).
    #[must_use]
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.config.extension = ext.into();
        self
    }

    /// Sets the inference API endpoint URL.
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Sets the model name.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Sets the maximum characters per chunk.
    #[must_use]
    pub const fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Sets the context window requested from the backend.
    #[must_use]
    pub const fn num_ctx(mut self, num_ctx: u32) -> Self {
        self.config.num_ctx = num_ctx;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the pause before each request. Zero disables pacing.
    #[must_use]
    pub const fn pacing(mut self, pacing: Duration) -> Self {
        self.config.pacing = pacing;
        self
    }

    /// Sets the instruction prepended to every chunk.
    #[must_use]
    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.config.instruction = instruction.into();
        self
    }

    /// Adds one extra HTTP header sent with every request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Overrides the embedded output template with a file.
    #[must_use]
    pub fn template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.template_path = Some(path.into());
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
