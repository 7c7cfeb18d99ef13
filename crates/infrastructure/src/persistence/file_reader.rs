//! Local file system source reader.

use std::io;
use std::path::Path;

use env0_application::sources::{ParseFilesOptions, SourceAggregator};
use env0_application::{SourceError, SourceReader};
use env0_domain::ParseResult;

/// Reads expression sources from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSourceReader;

impl LocalSourceReader {
    /// Creates a new `LocalSourceReader`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SourceReader for LocalSourceReader {
    fn read_source(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

const fn local_aggregator() -> SourceAggregator<LocalSourceReader> {
    SourceAggregator::new(LocalSourceReader::new())
}

/// Parses a single file from disk.
///
/// # Errors
/// Returns an error if the file cannot be read or contains an invalid line.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParseResult, SourceError> {
    local_aggregator().parse_file(path)
}

/// Parses and merges files from disk, later files taking precedence.
///
/// Each file is followed by its `.local` companion unless disabled in
/// `options`.
///
/// # Errors
/// Returns an error if a file cannot be read or contains an invalid line.
pub fn parse_files<P: AsRef<Path>>(
    paths: &[P],
    options: ParseFilesOptions,
) -> Result<ParseResult, SourceError> {
    local_aggregator().parse_files(paths, options)
}

/// Parses files from disk, then applies inline entries on top.
///
/// # Errors
/// Returns an error if a file or an entry is invalid.
pub fn load<P: AsRef<Path>, E: AsRef<str>>(
    paths: &[P],
    entries: &[E],
    options: ParseFilesOptions,
) -> Result<ParseResult, SourceError> {
    local_aggregator().load(paths, entries, options)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env0");
        std::fs::write(&path, "API_KEY\n").unwrap();

        let content = LocalSourceReader::new().read_source(&path).unwrap();
        assert_eq!(content, "API_KEY\n");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = LocalSourceReader::new()
            .read_source(&dir.path().join("absent"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_parse_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.env0");

        let err = parse_file(&path).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Failed to read file "));
        assert!(message.contains("missing.env0"));
    }
}
