use crate::assembler::CheatSheet;
use crate::config::Config;
use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const OUTPUT_EXTENSION: &str = "md";

/// Writes finished cheat sheets into the output directory.
pub(crate) struct Writer {
    output_dir: PathBuf,
}

impl Writer {
    /// Creates a new writer from configuration.
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
        }
    }

    /// Returns the output path for a document stem.
    pub(crate) fn output_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}.{OUTPUT_EXTENSION}"))
    }

    /// Writes one cheat sheet, replacing any existing file.
    ///
    /// The output directory is created on demand.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub(crate) fn write(&self, sheet: &CheatSheet) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::io(&self.output_dir, e))?;

        let path = self.output_path(&sheet.stem);
        Self::write_file_atomic(&path, &sheet.markdown)?;

        info!("✓ Saved {}", path.display());
        Ok(path)
    }

    /// Writes a file atomically.
    ///
    /// # Process
    ///
    /// 1. Writes content to a temporary file
    /// 2. Syncs the temporary file to disk
    /// 3. Atomically renames the temporary file to the target path
    ///
    /// This ensures no partial file is left if the write is interrupted.
    fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
        let temp_path = path.with_extension("tmp");
        let mut temp_file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;

        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| Error::io(&temp_path, e))?;

        temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

        drop(temp_file);

        fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;

        Ok(())
    }
}
