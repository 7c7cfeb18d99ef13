//! Parser for the env0 expression language.
//!
//! Each non-blank, non-comment line is one of:
//! - `[item:NAME]` - section header, scopes the following lookups to item `NAME`
//! - `KEY="text"` or `KEY='text'` - literal value
//! - `KEY=OTHER` - reference, looks up `OTHER`
//! - `KEY` - shorthand, looks up `KEY`

use std::collections::BTreeMap;

use super::parse_result::ParseResult;
use super::types::Expression;
use crate::error::ParseError;

const SECTION_PREFIX: &str = "[item:";
const SECTION_SUFFIX: char = ']';

/// Returns true if `name` matches `[A-Za-z][A-Za-z0-9_]*`.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Parses a `[item:NAME]` section header.
///
/// Returns `Ok(None)` if the line is not a section header.
///
/// # Errors
///
/// Returns [`ParseError::EmptySectionName`] if the trimmed name is empty.
pub fn parse_section_header(line: &str) -> Result<Option<String>, ParseError> {
    let Some(inner) = line
        .strip_prefix(SECTION_PREFIX)
        .and_then(|rest| rest.strip_suffix(SECTION_SUFFIX))
    else {
        return Ok(None);
    };

    if inner.contains(SECTION_SUFFIX) {
        return Ok(None);
    }

    let name = inner.trim();
    if name.is_empty() {
        return Err(ParseError::EmptySectionName);
    }

    Ok(Some(name.to_string()))
}

/// Parses one expression line under the given item context.
///
/// Literals never carry the item context; references and shorthands do.
///
/// # Errors
///
/// Returns [`ParseError::InvalidExpression`] if the line matches none of the
/// literal, reference or shorthand forms.
pub fn parse_line(line: &str, item_context: Option<&str>) -> Result<Expression, ParseError> {
    let invalid = || ParseError::InvalidExpression(line.to_string());

    let Some((lhs, rhs)) = line.split_once('=') else {
        return if is_identifier(line) {
            Ok(Expression::shorthand(line, item_context.map(String::from)))
        } else {
            Err(invalid())
        };
    };

    let key = lhs.trim_end();
    if !is_identifier(key) {
        return Err(invalid());
    }
    let rhs = rhs.trim_start();

    if let Some(text) = quoted_text(rhs) {
        return Ok(Expression::literal(key, text));
    }

    if is_identifier(rhs) {
        return Ok(Expression::reference(
            key,
            rhs,
            item_context.map(String::from),
        ));
    }

    Err(invalid())
}

/// Returns the text between matching outer quotes.
///
/// Inner quote characters are kept as-is; there is no escape processing.
fn quoted_text(rhs: &str) -> Option<&str> {
    let quote = rhs.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let text = rhs.strip_prefix(quote)?.strip_suffix(quote)?;
    (!text.is_empty()).then_some(text)
}

/// Trims lines and drops blanks and `#` comments.
pub fn filter_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Folds the filtered lines of one source into a key-unique mapping.
///
/// Section context starts empty and only lives for these lines. The last
/// occurrence of a key wins.
///
/// # Errors
///
/// Returns the first [`ParseError`]; nothing from the source is kept.
pub fn parse_lines<'a, I>(lines: I) -> Result<BTreeMap<String, Expression>, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let (expressions, _context) = lines.into_iter().try_fold(
        (BTreeMap::new(), None::<String>),
        |(mut expressions, context), line| -> Result<_, ParseError> {
            if let Some(item) = parse_section_header(line)? {
                return Ok((expressions, Some(item)));
            }

            let expr = parse_line(line, context.as_deref())?;
            expressions.insert(expr.key.clone(), expr);
            Ok((expressions, context))
        },
    )?;

    Ok(expressions)
}

/// Parses a whole source text.
///
/// # Examples
///
/// ```
/// use env0_domain::expression::parse;
///
/// let result = parse("ZEBRA\nALPHA\n# comment\nBETA=\"b\"").unwrap();
/// assert_eq!(result.keys(), vec!["ALPHA", "BETA", "ZEBRA"]);
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] for a malformed line or an empty section name.
pub fn parse(text: &str) -> Result<ParseResult, ParseError> {
    parse_lines(filter_lines(text)).map(ParseResult::from)
}

/// Parses an inline entry.
///
/// Same grammar as [`parse`], without section headers.
///
/// # Errors
///
/// Returns [`ParseError::SectionNotAllowed`] if the entry contains a section
/// header, or any error [`parse`] would return.
pub fn parse_entry(text: &str) -> Result<ParseResult, ParseError> {
    if let Some(line) = filter_lines(text).find(|line| line.starts_with(SECTION_PREFIX)) {
        return Err(ParseError::SectionNotAllowed(line.to_string()));
    }
    parse(text)
}
