//! Single vault lookup for one expression.

use env0_domain::{Expression, ExpressionKind, LookupTarget};

use crate::error::LookupFailure;
use crate::ports::Vault;

/// A pending vault lookup for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Lookup {
    key: String,
    target: LookupTarget,
    via_reference: bool,
}

impl Lookup {
    /// Builds the lookup for `expr`, or `None` for literals.
    pub(crate) fn from_expression(expr: &Expression) -> Option<Self> {
        let target = expr.lookup_target()?;
        Some(Self {
            key: expr.key.clone(),
            target,
            via_reference: matches!(expr.kind, ExpressionKind::Reference { .. }),
        })
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    /// Queries the vault, returning `(key, value)`.
    pub(crate) async fn run<V: Vault + ?Sized>(
        self,
        vault: &V,
    ) -> Result<(String, String), LookupFailure> {
        tracing::debug!(key = %self.key, lookup = ?self.target, "Resolving secret");

        let found = match &self.target {
            LookupTarget::Item { item } => vault.get_item(item).await,
            LookupTarget::Field { item, field } => vault.get_field(item, field).await,
        };

        match found {
            Ok(Some(field)) => Ok((self.key, field.value)),
            Ok(None) => {
                let message = self.not_found_message();
                Err(LookupFailure::new(self.key, message))
            }
            Err(e) => {
                tracing::debug!(key = %self.key, error = %e, "Vault lookup failed");
                Err(LookupFailure::new(self.key, e.to_string()))
            }
        }
    }

    fn not_found_message(&self) -> String {
        match &self.target {
            LookupTarget::Field { item, field } => {
                format!("No field \"{field}\" found in item \"{item}\"")
            }
            LookupTarget::Item { item } if self.via_reference => {
                format!("No item found for reference {item}")
            }
            LookupTarget::Item { item } => format!("No item found for {item}"),
        }
    }
}
