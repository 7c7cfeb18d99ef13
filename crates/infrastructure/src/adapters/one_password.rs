//! 1Password CLI vault adapter
//!
//! Every lookup runs `op item get <id> --vault <vault> --format json` and
//! decodes the printed item. The CLI keeps its own session, so the first call
//! may prompt for an unlock; the resolution engine issues that call alone.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use env0_application::{LoaderConfig, Vault, VaultError};
use env0_domain::{VaultField, VaultItem};
use tokio::process::Command;

/// Program invoked when none is configured.
pub const DEFAULT_PROGRAM: &str = "op";

/// Fragment of the CLI's error output for an unknown item.
const UNKNOWN_ITEM_MARKER: &str = "isn't an item";

/// Vault backed by the 1Password command-line tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnePasswordVault {
    vault: String,
    program: PathBuf,
}

impl OnePasswordVault {
    /// Creates an adapter for the named vault using `op` from `PATH`.
    #[must_use]
    pub fn new(vault: impl Into<String>) -> Self {
        Self {
            vault: vault.into(),
            program: PathBuf::from(DEFAULT_PROGRAM),
        }
    }

    /// Creates an adapter for the vault named in `config`.
    ///
    /// # Errors
    /// Returns [`VaultError::Unavailable`] if no vault is configured.
    pub fn from_config(config: &LoaderConfig) -> Result<Self, VaultError> {
        config
            .vault
            .as_deref()
            .map(Self::new)
            .ok_or_else(|| VaultError::Unavailable("no vault name configured".to_string()))
    }

    /// Uses a different CLI binary.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Returns the vault name.
    #[must_use]
    pub fn vault(&self) -> &str {
        &self.vault
    }

    fn args(&self, identifier: &str) -> Vec<OsString> {
        ["item", "get", identifier, "--vault", self.vault.as_str(), "--format", "json"]
            .into_iter()
            .map(OsString::from)
            .collect()
    }

    async fn fetch_item(&self, identifier: &str) -> Result<Option<VaultItem>, VaultError> {
        tracing::debug!(item = %identifier, vault = %self.vault, "Fetching item");

        let output = Command::new(&self.program)
            .args(self.args(identifier))
            .stdin(Stdio::inherit())
            .kill_on_drop(true)
            .output()
            .await?;

        if output.status.success() {
            decode_item(&output.stdout).map(Some)
        } else {
            decode_failure(output.status.to_string(), &output.stderr)
        }
    }
}

/// Decodes the JSON item printed on success.
fn decode_item(stdout: &[u8]) -> Result<VaultItem, VaultError> {
    let text = String::from_utf8_lossy(stdout);
    serde_json::from_str(text.trim()).map_err(|e| VaultError::InvalidResponse(e.to_string()))
}

/// Maps a failed invocation: unknown items are absent, anything else is an error.
fn decode_failure(status: String, stderr: &[u8]) -> Result<Option<VaultItem>, VaultError> {
    let stderr = String::from_utf8_lossy(stderr).trim().to_string();
    if stderr.contains(UNKNOWN_ITEM_MARKER) {
        return Ok(None);
    }
    Err(VaultError::CommandFailed { status, stderr })
}

#[async_trait]
impl Vault for OnePasswordVault {
    async fn get_item(&self, identifier: &str) -> Result<Option<VaultField>, VaultError> {
        Ok(self
            .fetch_item(identifier)
            .await?
            .and_then(|item| item.first_secret_field()))
    }

    async fn get_field(&self, item: &str, label: &str) -> Result<Option<VaultField>, VaultError> {
        Ok(self
            .fetch_item(item)
            .await?
            .and_then(|found| found.field_labeled(label)))
    }
}
