use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// A loaded input file ready for conversion.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Path the content was read from
    pub path: PathBuf,

    /// File name without the extension; names the output file
    pub stem: String,

    /// Whole-file text with surrounding whitespace trimmed
    pub content: String,
}

impl SourceDocument {
    /// Returns true if the trimmed content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the content length in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// Reads one input file as UTF-8 text, trimming surrounding whitespace.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn read_source(path: &Path) -> Result<SourceDocument> {
    trace!("Reading {}", path.display());

    let raw = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            Error::invalid_utf8(path)
        } else {
            Error::io(path, e)
        }
    })?;

    let stem = path
        .file_stem()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned();

    Ok(SourceDocument {
        path: path.to_path_buf(),
        stem,
        content: raw.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_read_trims_surrounding_whitespace() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str("  \n\thello world\n\n  ").unwrap();

        let document = read_source(file.path()).unwrap();
        assert_eq!(document.content, "hello world");
        assert_eq!(document.stem, "notes");
        assert_eq!(document.char_len(), 11);
    }

    #[test]
    fn test_interior_whitespace_is_preserved() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("spaced.txt");
        file.write_str("one\n\ntwo  three\n").unwrap();

        let document = read_source(file.path()).unwrap();
        assert_eq!(document.content, "one\n\ntwo  three");
    }

    #[test]
    fn test_whitespace_only_file_is_empty() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("blank.txt");
        file.write_str(" \n\t \n").unwrap();

        let document = read_source(file.path()).unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_reported_as_such() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("garbled.txt");
        file.write_binary(&[0xFF, 0xFE, 0x68, 0x69]).unwrap();

        let err = read_source(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = read_source(&temp.path().join("nope.txt")).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_stem_keeps_inner_dots() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("kubectl.cheats.txt");
        file.write_str("x").unwrap();

        let document = read_source(file.path()).unwrap();
        assert_eq!(document.stem, "kubectl.cheats");
    }
}
