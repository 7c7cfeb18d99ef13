//! Sorted, key-unique snapshot of parsed expressions.

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::Expression;

/// Immutable mapping of key to [`Expression`].
///
/// Keys are always enumerated in ascending order, whatever order the
/// source lines came in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParseResult {
    expressions: BTreeMap<String, Expression>,
}

impl ParseResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.expressions.keys().map(String::as_str).collect()
    }

    /// Returns the full mapping.
    #[must_use]
    pub const fn expressions(&self) -> &BTreeMap<String, Expression> {
        &self.expressions
    }

    /// Returns true if `key` is defined. Case-sensitive.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.expressions.contains_key(key)
    }

    /// Returns the expression for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Expression> {
        self.expressions.get(key)
    }

    /// Returns the number of expressions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// Returns true if there are no expressions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Iterates expressions in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = &Expression> {
        self.expressions.values()
    }

    /// Consumes the result, returning the underlying mapping.
    #[must_use]
    pub fn into_expressions(self) -> BTreeMap<String, Expression> {
        self.expressions
    }
}

impl From<BTreeMap<String, Expression>> for ParseResult {
    fn from(expressions: BTreeMap<String, Expression>) -> Self {
        Self { expressions }
    }
}

/// Later expressions with the same key replace earlier ones.
impl FromIterator<Expression> for ParseResult {
    fn from_iter<I: IntoIterator<Item = Expression>>(iter: I) -> Self {
        let expressions = iter
            .into_iter()
            .map(|expr| (expr.key.clone(), expr))
            .collect();
        Self { expressions }
    }
}

impl<'a> IntoIterator for &'a ParseResult {
    type Item = &'a Expression;
    type IntoIter = std::collections::btree_map::Values<'a, String, Expression>;

    fn into_iter(self) -> Self::IntoIter {
        self.expressions.values()
    }
}
