//! Domain error types

use thiserror::Error;

/// Errors raised while turning expression text into [`Expression`]s.
///
/// Parsing of a source stops at the first error; no partial result is kept.
///
/// [`Expression`]: crate::expression::Expression
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line matches none of the literal, reference or shorthand forms.
    #[error("Invalid environment variable expression: {0}")]
    InvalidExpression(String),

    /// A `[item:]` header whose name is empty after trimming.
    #[error("Invalid section: item name cannot be empty")]
    EmptySectionName,

    /// A section header inside an inline entry.
    #[error("Section headers are not allowed in inline entries: {0}")]
    SectionNotAllowed(String),
}
