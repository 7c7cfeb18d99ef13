//! Expression records produced by the parser.

use serde::{Deserialize, Serialize};

/// One parsed line: an environment variable name and the rule that
/// produces its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    /// The environment variable name.
    pub key: String,

    /// How the value is obtained.
    #[serde(flatten)]
    pub kind: ExpressionKind,
}

/// The value-producing rule of an [`Expression`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExpressionKind {
    /// `KEY="text"`: the value is final at parse time.
    Literal {
        /// The quoted text, verbatim.
        value: String,
    },

    /// `KEY=OTHER`: the value comes from looking up `OTHER`.
    Reference {
        /// The lookup identifier.
        #[serde(rename = "value")]
        target: String,
        /// Enclosing `[item:NAME]` section, if any.
        #[serde(
            rename = "itemContext",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        item_context: Option<String>,
    },

    /// `KEY`: the value comes from looking up `KEY` itself.
    Shorthand {
        /// Enclosing `[item:NAME]` section, if any.
        #[serde(
            rename = "itemContext",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        item_context: Option<String>,
    },
}

/// Where in the vault a lookup expression is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupTarget {
    /// The first non-notes field of the item with this identifier.
    Item {
        /// Item title or id.
        item: String,
    },

    /// The field with exactly this label inside the named item.
    Field {
        /// Item title or id.
        item: String,
        /// Field label.
        field: String,
    },
}

impl Expression {
    /// Creates a literal expression.
    #[must_use]
    pub fn literal(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: ExpressionKind::Literal {
                value: value.into(),
            },
        }
    }

    /// Creates a reference expression.
    #[must_use]
    pub fn reference(
        key: impl Into<String>,
        target: impl Into<String>,
        item_context: Option<String>,
    ) -> Self {
        Self {
            key: key.into(),
            kind: ExpressionKind::Reference {
                target: target.into(),
                item_context,
            },
        }
    }

    /// Creates a shorthand expression.
    #[must_use]
    pub fn shorthand(key: impl Into<String>, item_context: Option<String>) -> Self {
        Self {
            key: key.into(),
            kind: ExpressionKind::Shorthand { item_context },
        }
    }

    /// Returns the literal text or the reference target.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            ExpressionKind::Literal { value } => Some(value),
            ExpressionKind::Reference { target, .. } => Some(target),
            ExpressionKind::Shorthand { .. } => None,
        }
    }

    /// Returns the enclosing item section, if any.
    #[must_use]
    pub fn item_context(&self) -> Option<&str> {
        match &self.kind {
            ExpressionKind::Literal { .. } => None,
            ExpressionKind::Reference { item_context, .. }
            | ExpressionKind::Shorthand { item_context } => item_context.as_deref(),
        }
    }

    /// Returns true if no vault lookup is needed.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self.kind, ExpressionKind::Literal { .. })
    }

    /// Computes the vault location this expression resolves from.
    ///
    /// Returns `None` for literals.
    #[must_use]
    pub fn lookup_target(&self) -> Option<LookupTarget> {
        let (name, item_context) = match &self.kind {
            ExpressionKind::Literal { .. } => return None,
            ExpressionKind::Reference {
                target,
                item_context,
            } => (target.as_str(), item_context),
            ExpressionKind::Shorthand { item_context } => (self.key.as_str(), item_context),
        };

        Some(match item_context {
            Some(item) => LookupTarget::Field {
                item: item.clone(),
                field: name.to_string(),
            },
            None => LookupTarget::Item {
                item: name.to_string(),
            },
        })
    }
}

impl ExpressionKind {
    /// Returns the lowercase kind name (`literal`, `reference`, `shorthand`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "literal",
            Self::Reference { .. } => "reference",
            Self::Shorthand { .. } => "shorthand",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literal_has_no_lookup_target() {
        let expr = Expression::literal("MODE", "production");
        assert!(expr.is_literal());
        assert_eq!(expr.value(), Some("production"));
        assert_eq!(expr.lookup_target(), None);
    }

    #[test]
    fn test_shorthand_targets_item_named_by_key() {
        let expr = Expression::shorthand("API_KEY", None);
        assert_eq!(
            expr.lookup_target(),
            Some(LookupTarget::Item {
                item: "API_KEY".to_string()
            })
        );
    }

    #[test]
    fn test_reference_targets_item_named_by_value() {
        let expr = Expression::reference("RENAMED", "SOURCE_KEY", None);
        assert_eq!(
            expr.lookup_target(),
            Some(LookupTarget::Item {
                item: "SOURCE_KEY".to_string()
            })
        );
    }

    #[test]
    fn test_item_context_redirects_to_field() {
        let shorthand = Expression::shorthand("SUPABASE_KEY", Some("supabase".to_string()));
        assert_eq!(
            shorthand.lookup_target(),
            Some(LookupTarget::Field {
                item: "supabase".to_string(),
                field: "SUPABASE_KEY".to_string(),
            })
        );

        let reference =
            Expression::reference("RENAMED", "SUPABASE_URL", Some("supabase".to_string()));
        assert_eq!(
            reference.lookup_target(),
            Some(LookupTarget::Field {
                item: "supabase".to_string(),
                field: "SUPABASE_URL".to_string(),
            })
        );
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let expr = Expression::reference("MY_KEY", "SOURCE_KEY", Some("stripe".to_string()));
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "key": "MY_KEY",
                "type": "reference",
                "value": "SOURCE_KEY",
                "itemContext": "stripe"
            })
        );

        let shorthand = serde_json::to_value(Expression::shorthand("API_KEY", None)).unwrap();
        assert_eq!(
            shorthand,
            serde_json::json!({ "key": "API_KEY", "type": "shorthand" })
        );
    }
}
