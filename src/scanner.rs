use crate::config::Config;
use ignore::WalkBuilder;
use std::path::PathBuf;
use tracing::{debug, trace, warn};

/// Scans the input directory for files to convert.
///
/// Only files directly inside the directory are considered;
/// subdirectories are not descended into.
pub(crate) struct Scanner {
    input_dir: PathBuf,
    suffix: String,
}

impl Scanner {
    /// Creates a new scanner from configuration.
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            input_dir: config.input_dir.clone(),
            suffix: format!(".{}", config.extension),
        }
    }

    /// Returns the matching files in deterministic order.
    ///
    /// Unreadable entries are logged and skipped.
    #[must_use]
    pub(crate) fn scan(&self) -> Vec<PathBuf> {
        debug!("Scanning {}", self.input_dir.display());

        let walker = WalkBuilder::new(&self.input_dir)
            .standard_filters(false)
            .follow_links(false)
            .max_depth(Some(1))
            .build();

        let mut files = Vec::new();
        for result in walker {
            match result {
                Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                    let name = entry.file_name().to_string_lossy();
                    if name.ends_with(&self.suffix) {
                        trace!("Matched {}", entry.path().display());
                        files.push(entry.into_path());
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Walk error: {e}");
                }
            }
        }

        // Sort for deterministic ordering
        files.sort();

        debug!("Found {} matching file(s)", files.len());
        files
    }
}
