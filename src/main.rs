use anyhow::Context;
use cheatmark::{Config, Pipeline};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "cheatmark",
    version,
    about = "Convert plain-text notes into Markdown cheat sheets",
    long_about = "Convert plain-text notes into Markdown cheat sheets via a local Ollama server.\n\n\
    This tool scans a directory for text files, splits each file into fixed-size \
    chunks, asks the model to summarize every chunk, and writes one Markdown \
    cheat sheet per input file into the output directory.\n\n\
    USAGE EXAMPLES:\n  \
      # Convert ./notes into ./cheatsheets\n  \
      cheatmark --input-dir ./notes --output-dir ./cheatsheets\n\n  \
      # Use a different model and a larger chunk size\n  \
      cheatmark -i ./notes -o ./out --model llama3 --chunk-size 2048\n\n  \
      # Preview the run without calling the backend\n  \
      cheatmark -i ./notes -o ./out --dry-run"
)]
struct Cli {
    /// Directory containing the input text files
    #[arg(short = 'i', long, value_name = "PATH")]
    input_dir: PathBuf,

    /// Directory the generated Markdown files are written to
    #[arg(short = 'o', long, value_name = "PATH")]
    output_dir: PathBuf,

    /// Model requested from the backend
    #[arg(short, long, env = "CHEATMARK_MODEL", default_value = "deepseek-coder-v2")]
    model: String,

    /// Inference API endpoint URL
    #[arg(long, env = "OLLAMA_API_URL", default_value = "http://localhost:11434/api/generate", value_name = "URL")]
    api_url: String,

    /// Maximum characters per chunk
    #[arg(long, default_value_t = 1024)]
    chunk_size: usize,

    /// Context window requested from the backend
    #[arg(long, default_value_t = 2048)]
    num_ctx: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 300, value_name = "SECS")]
    timeout_secs: u64,

    /// Pause before each request in seconds (0 disables pacing)
    #[arg(long, default_value_t = 2, value_name = "SECS")]
    pacing_secs: u64,

    /// Instruction prepended to every chunk
    #[arg(long, value_name = "TEXT")]
    prompt: Option<String>,

    /// Input file extension, without the dot
    #[arg(long, default_value = "txt", value_name = "EXT")]
    extension: String,

    /// Extra HTTP header in NAME=VALUE format (can be used multiple times)
    ///
    /// Example: cheatmark --header X-Api-Key=secret --header X-Team=docs
    #[arg(long, value_name = "NAME=VALUE")]
    header: Vec<String>,

    /// Path to a Tera template file overriding the built-in output layout
    ///
    /// The template receives `banner` and `blocks` variables.
    #[arg(long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Scan and report without calling the backend or writing files
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose)?;

    let mut builder = Config::builder()
        .input_dir(cli.input_dir)
        .output_dir(cli.output_dir)
        .extension(cli.extension)
        .api_url(cli.api_url)
        .model(cli.model)
        .chunk_size(cli.chunk_size)
        .num_ctx(cli.num_ctx)
        .timeout(Duration::from_secs(cli.timeout_secs))
        .pacing(Duration::from_secs(cli.pacing_secs))
        .dry_run(cli.dry_run);

    if let Some(prompt) = cli.prompt {
        builder = builder.instruction(prompt);
    }

    if let Some(template) = cli.template {
        builder = builder.template_path(template);
    }

    for item in cli.header {
        if let Some((name, value)) = item.split_once('=') {
            builder = builder.header(name, value);
        } else {
            eprintln!(
                "Warning: Invalid header format '{}', expected NAME=VALUE",
                item
            );
        }
    }

    let config = builder.build().context("Failed to build configuration")?;

    let stats = Pipeline::new(config)
        .context("Failed to create pipeline")?
        .run()
        .context("Conversion run failed")?;

    stats.print_summary();

    Ok(())
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("cheatmark=info"),
        1 => EnvFilter::new("cheatmark=debug"),
        _ => EnvFilter::new("cheatmark=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();

    Ok(())
}
