//! In-memory vault

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use env0_application::{Vault, VaultError};
use env0_domain::{VaultField, VaultItem};
use tokio::sync::RwLock;

/// Vault holding items in memory, keyed by title.
///
/// Useful for tests and for hosts that fetch secrets some other way.
#[derive(Debug, Default)]
pub struct InMemoryVault {
    items: RwLock<HashMap<String, VaultItem>>,
    lookups: AtomicUsize,
}

impl InMemoryVault {
    /// Creates an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, replacing any item with the same title.
    #[must_use]
    pub fn with_item(mut self, item: VaultItem) -> Self {
        self.items.get_mut().insert(item.title.clone(), item);
        self
    }

    /// Inserts or replaces an item.
    pub async fn insert(&self, item: VaultItem) {
        self.items.write().await.insert(item.title.clone(), item);
    }

    /// Number of lookups served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    async fn find<F>(&self, title: &str, select: F) -> Option<VaultField>
    where
        F: FnOnce(&VaultItem) -> Option<VaultField>,
    {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.items.read().await.get(title).and_then(select)
    }
}

#[async_trait]
impl Vault for InMemoryVault {
    async fn get_item(&self, identifier: &str) -> Result<Option<VaultField>, VaultError> {
        Ok(self.find(identifier, VaultItem::first_secret_field).await)
    }

    async fn get_field(&self, item: &str, label: &str) -> Result<Option<VaultField>, VaultError> {
        Ok(self.find(item, |found| found.field_labeled(label)).await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use env0_domain::ItemField;
    use pretty_assertions::assert_eq;

    fn supabase() -> VaultItem {
        VaultItem::new("supabase")
            .with_field(ItemField::new("notes", "ignore me").with_purpose("NOTES"))
            .with_field(ItemField::new("SUPABASE_URL", "https://db.example"))
            .with_field(ItemField::new("SUPABASE_KEY", "sb-key"))
    }

    #[tokio::test]
    async fn test_get_item_skips_notes() {
        let vault = InMemoryVault::new().with_item(supabase());
        let field = vault.get_item("supabase").await.unwrap().unwrap();
        assert_eq!(field.value, "https://db.example");
    }

    #[tokio::test]
    async fn test_get_field_by_label() {
        let vault = InMemoryVault::new().with_item(supabase());
        let field = vault
            .get_field("supabase", "SUPABASE_KEY")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(field.value, "sb-key");
        assert_eq!(vault.get_field("supabase", "OTHER").await.unwrap(), None);
        assert_eq!(vault.get_field("missing", "SUPABASE_KEY").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_replaces_item() {
        let vault = InMemoryVault::new()
            .with_item(VaultItem::new("API_KEY").with_field(ItemField::new("password", "old")));
        vault
            .insert(VaultItem::new("API_KEY").with_field(ItemField::new("password", "new")))
            .await;

        let field = vault.get_item("API_KEY").await.unwrap().unwrap();
        assert_eq!(field.value, "new");
        assert_eq!(vault.lookup_count(), 1);
    }

    #[tokio::test]
    async fn test_notes_only_item_has_no_value() {
        let memo = VaultItem::new("memo")
            .with_field(ItemField::new("notes", "text").with_purpose("NOTES"));
        let vault = InMemoryVault::new().with_item(memo);
        assert_eq!(vault.get_item("memo").await.unwrap(), None);
    }
}
