//! Source aggregation
//!
//! Merges files, their `.local` companions and inline entries into one
//! key-unique mapping. Precedence, lowest first:
//! 1. each file in the order given, immediately followed by its companion
//! 2. inline entries, in the order given
//!
//! A later source replaces a whole expression; fields are never merged.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use env0_domain::expression::{filter_lines, parse_entry, parse_lines};
use env0_domain::{Expression, ParseResult};
use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::ports::SourceReader;

/// Suffix appended to a source path to find its local override companion.
pub const LOCAL_OVERRIDE_SUFFIX: &str = ".local";

/// Options for [`SourceAggregator::parse_files`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseFilesOptions {
    /// Also read `<path>.local` after each file (default: true).
    #[serde(default = "default_resolve_local_overrides")]
    pub resolve_local_overrides: bool,
}

const fn default_resolve_local_overrides() -> bool {
    true
}

impl Default for ParseFilesOptions {
    fn default() -> Self {
        Self {
            resolve_local_overrides: true,
        }
    }
}

/// Returns the local override companion path for `path`.
#[must_use]
pub fn local_override_path(path: &Path) -> PathBuf {
    let mut companion = OsString::from(path.as_os_str());
    companion.push(LOCAL_OVERRIDE_SUFFIX);
    PathBuf::from(companion)
}

/// Reads and merges expression sources.
#[derive(Debug, Clone)]
pub struct SourceAggregator<R> {
    reader: R,
}

impl<R: SourceReader> SourceAggregator<R> {
    /// Creates a new aggregator reading through `reader`.
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads and parses a single file.
    ///
    /// # Errors
    /// Returns [`SourceError::FileRead`] if the file is absent or unreadable,
    /// or [`SourceError::Parse`] if it contains a malformed line.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParseResult, SourceError> {
        let path = path.as_ref();
        let text = self.read_required(path)?;
        parse_source(path, &text).map(ParseResult::from)
    }

    /// Reads, parses and merges files in order.
    ///
    /// Each file is parsed on its own, so section context never carries
    /// over. With `resolve_local_overrides`, a file's `.local` companion is
    /// applied right after it; a missing companion counts as empty.
    ///
    /// # Errors
    /// Returns [`SourceError::FileRead`] if a listed file is absent, or if
    /// any file (including a present companion) cannot be read, and
    /// [`SourceError::Parse`] for a malformed line.
    pub fn parse_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
        options: ParseFilesOptions,
    ) -> Result<ParseResult, SourceError> {
        let mut merged = BTreeMap::new();

        for path in paths {
            let path = path.as_ref();

            let text = self.read_required(path)?;
            let base = parse_source(path, &text)?;
            tracing::debug!(path = %path.display(), keys = base.len(), "Parsed source");
            merged.extend(base);

            if !options.resolve_local_overrides {
                continue;
            }

            let companion = local_override_path(path);
            if let Some(text) = self.read_optional(&companion)? {
                let local = parse_source(&companion, &text)?;
                tracing::debug!(
                    path = %companion.display(),
                    keys = local.len(),
                    "Applied local overrides"
                );
                merged.extend(local);
            }
        }

        Ok(ParseResult::from(merged))
    }

    /// Reads the given files, then applies inline entries on top.
    ///
    /// # Errors
    /// Returns the first [`SourceError`] from either step.
    pub fn load<P: AsRef<Path>, E: AsRef<str>>(
        &self,
        paths: &[P],
        entries: &[E],
        options: ParseFilesOptions,
    ) -> Result<ParseResult, SourceError> {
        let files = self.parse_files(paths, options)?;
        merge_entries(files, entries)
    }

    fn read_required(&self, path: &Path) -> Result<String, SourceError> {
        self.reader
            .read_source(path)
            .map_err(|source| SourceError::FileRead {
                path: path.to_path_buf(),
                source,
            })
    }

    fn read_optional(&self, path: &Path) -> Result<Option<String>, SourceError> {
        match self.reader.read_source(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SourceError::FileRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Applies inline entries on top of `base`, each overriding same-key
/// expressions accumulated so far.
///
/// Entries are parsed without section context and may not contain section
/// headers.
///
/// # Errors
/// Returns [`SourceError::Entry`] for a malformed entry.
pub fn merge_entries<E: AsRef<str>>(
    base: ParseResult,
    entries: &[E],
) -> Result<ParseResult, SourceError> {
    let mut merged = base.into_expressions();

    for entry in entries {
        let entry = entry.as_ref();
        let parsed = parse_entry(entry).map_err(|source| SourceError::Entry {
            entry: entry.to_string(),
            source,
        })?;
        merged.extend(parsed.into_expressions());
    }

    Ok(ParseResult::from(merged))
}

fn parse_source(path: &Path, text: &str) -> Result<BTreeMap<String, Expression>, SourceError> {
    parse_lines(filter_lines(text)).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
