//! Vault item model
//!
//! Mirrors the JSON shape returned by `op item get --format json`.

use serde::{Deserialize, Serialize};

/// Field purpose marking free-form notes; never returned by item lookups.
pub const NOTES_PURPOSE: &str = "NOTES";

/// A resolved vault field: what a lookup hands back to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultField {
    /// Field type as reported by the vault (e.g. `CONCEALED`, `STRING`).
    pub field_type: String,

    /// The secret value.
    pub value: String,
}

/// One field inside a [`VaultItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemField {
    /// Field id.
    #[serde(default)]
    pub id: String,

    /// Field type (e.g. `CONCEALED`, `STRING`).
    #[serde(rename = "type", default)]
    pub field_type: String,

    /// Field purpose (`USERNAME`, `PASSWORD`, `NOTES`), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    /// Human-readable label.
    #[serde(default)]
    pub label: String,

    /// Field value. Absent for fields the vault has no value for.
    #[serde(default)]
    pub value: Option<String>,
}

/// A vault item: a titled collection of fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VaultItem {
    /// Item id.
    #[serde(default)]
    pub id: String,

    /// Item title.
    #[serde(default)]
    pub title: String,

    /// Fields in vault order.
    #[serde(default)]
    pub fields: Vec<ItemField>,
}

impl ItemField {
    /// Creates a field with the given label and value.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: label.clone(),
            field_type: "CONCEALED".to_string(),
            purpose: None,
            label,
            value: Some(value.into()),
        }
    }

    /// Sets the purpose.
    #[must_use]
    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    /// Returns true if this field holds notes.
    #[must_use]
    pub fn is_notes(&self) -> bool {
        self.purpose.as_deref() == Some(NOTES_PURPOSE)
    }

    fn to_vault_field(&self) -> VaultField {
        VaultField {
            field_type: self.field_type.clone(),
            value: self.value.clone().unwrap_or_default(),
        }
    }
}

impl VaultItem {
    /// Creates an empty item with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: title.clone(),
            title,
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: ItemField) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the first field that is not notes.
    #[must_use]
    pub fn first_secret_field(&self) -> Option<VaultField> {
        self.fields
            .iter()
            .find(|field| !field.is_notes())
            .map(ItemField::to_vault_field)
    }

    /// Returns the field whose label is exactly `label`.
    #[must_use]
    pub fn field_labeled(&self, label: &str) -> Option<VaultField> {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(ItemField::to_vault_field)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_item() -> VaultItem {
        VaultItem::new("supabase")
            .with_field(ItemField::new("notesPlain", "remember me").with_purpose(NOTES_PURPOSE))
            .with_field(ItemField::new("password", "pw-123").with_purpose("PASSWORD"))
            .with_field(ItemField::new("SUPABASE_URL", "https://db.example.com"))
    }

    #[test]
    fn test_first_secret_field_skips_notes() {
        let field = sample_item().first_secret_field().unwrap();
        assert_eq!(field.value, "pw-123");
    }

    #[test]
    fn test_first_secret_field_none_when_only_notes() {
        let item = VaultItem::new("notes-only")
            .with_field(ItemField::new("notesPlain", "text").with_purpose(NOTES_PURPOSE));
        assert_eq!(item.first_secret_field(), None);
    }

    #[test]
    fn test_field_labeled_exact_match() {
        let item = sample_item();
        assert_eq!(
            item.field_labeled("SUPABASE_URL").unwrap().value,
            "https://db.example.com"
        );
        assert_eq!(item.field_labeled("supabase_url"), None);
    }

    #[test]
    fn test_deserialize_op_item_json() {
        let json = r#"{
            "id": "abc123",
            "title": "API_KEY",
            "version": 2,
            "vault": { "id": "v1", "name": "dev" },
            "category": "PASSWORD",
            "fields": [
                { "id": "notesPlain", "type": "STRING", "purpose": "NOTES", "label": "notesPlain" },
                { "id": "password", "type": "CONCEALED", "purpose": "PASSWORD", "label": "password", "value": "s3cr3t" }
            ]
        }"#;

        let item: VaultItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.title, "API_KEY");
        assert_eq!(
            item.first_secret_field(),
            Some(VaultField {
                field_type: "CONCEALED".to_string(),
                value: "s3cr3t".to_string(),
            })
        );
    }
}
