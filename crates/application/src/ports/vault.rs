//! Vault port
//!
//! Defines the lookup contract the resolution engine depends on.

use std::sync::Arc;

use async_trait::async_trait;
use env0_domain::VaultField;

/// Errors a vault adapter can surface.
///
/// The engine treats every variant as an ordinary lookup failure of the key
/// that asked for it.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// I/O error talking to the vault (e.g. the CLI could not be spawned).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The vault command exited unsuccessfully.
    #[error("vault command failed ({status}): {stderr}")]
    CommandFailed {
        /// Exit status description.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The vault answered with something that could not be decoded.
    #[error("invalid vault response: {0}")]
    InvalidResponse(String),

    /// The vault cannot be used (locked, not configured).
    #[error("vault unavailable: {0}")]
    Unavailable(String),
}

/// Secret lookup capability.
///
/// Implementations must be safe to call concurrently. The engine never opens
/// or closes sessions; the first call may trigger an interactive unlock.
#[async_trait]
pub trait Vault: Send + Sync {
    /// Returns the first non-notes field of the item named `identifier`.
    ///
    /// # Errors
    /// Returns an error if the vault could not be queried.
    async fn get_item(&self, identifier: &str) -> Result<Option<VaultField>, VaultError>;

    /// Returns the field labelled exactly `label` inside item `item`.
    ///
    /// # Errors
    /// Returns an error if the vault could not be queried.
    async fn get_field(&self, item: &str, label: &str) -> Result<Option<VaultField>, VaultError>;
}

#[async_trait]
impl<V: Vault + ?Sized> Vault for &V {
    async fn get_item(&self, identifier: &str) -> Result<Option<VaultField>, VaultError> {
        (**self).get_item(identifier).await
    }

    async fn get_field(&self, item: &str, label: &str) -> Result<Option<VaultField>, VaultError> {
        (**self).get_field(item, label).await
    }
}

#[async_trait]
impl<V: Vault + ?Sized> Vault for Arc<V> {
    async fn get_item(&self, identifier: &str) -> Result<Option<VaultField>, VaultError> {
        (**self).get_item(identifier).await
    }

    async fn get_field(&self, item: &str, label: &str) -> Result<Option<VaultField>, VaultError> {
        (**self).get_field(item, label).await
    }
}

#[async_trait]
impl<V: Vault + ?Sized> Vault for Box<V> {
    async fn get_item(&self, identifier: &str) -> Result<Option<VaultField>, VaultError> {
        (**self).get_item(identifier).await
    }

    async fn get_field(&self, item: &str, label: &str) -> Result<Option<VaultField>, VaultError> {
        (**self).get_field(item, label).await
    }
}
