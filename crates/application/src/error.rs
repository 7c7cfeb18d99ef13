//! Application error types

use std::fmt;
use std::path::PathBuf;

use env0_domain::ParseError;
use thiserror::Error;

/// Errors raised while reading and merging expression sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A required source file is missing or unreadable.
    #[error("Failed to read file {}: {source}", .path.display())]
    FileRead {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A source file contains a malformed line.
    #[error("{source} (in {})", .path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// The parse failure.
        #[source]
        source: ParseError,
    },

    /// An inline entry is malformed.
    #[error("{source} (in entry {entry:?})")]
    Entry {
        /// The entry text.
        entry: String,
        /// The parse failure.
        #[source]
        source: ParseError,
    },
}

/// One key that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    /// The environment variable being resolved.
    pub key: String,
    /// What went wrong.
    pub message: String,
}

impl LookupFailure {
    /// Creates a new failure record.
    #[must_use]
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Errors raised by the resolution engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// One or more lookups failed. Raised once, after every lookup ran.
    #[error("{}", describe_failures(.failures))]
    Aggregated {
        /// Every failure, in the order lookups were issued.
        failures: Vec<LookupFailure>,
    },
}

impl ResolutionError {
    /// Returns the collected failures.
    #[must_use]
    pub fn failures(&self) -> &[LookupFailure] {
        match self {
            Self::Aggregated { failures } => failures,
        }
    }
}

fn describe_failures(failures: &[LookupFailure]) -> String {
    let lines: Vec<String> = failures.iter().map(|f| format!("- {f}")).collect();
    format!(
        "Failed to load {} secret(s):\n{}",
        failures.len(),
        lines.join("\n")
    )
}
