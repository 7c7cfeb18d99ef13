//! Loader configuration
//!
//! Defaults match the command-line tool: read `.env0` and its `.local`
//! companion, prime the vault with one lookup before fanning out.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::resolution::LookupSchedule;
use crate::sources::ParseFilesOptions;

/// Source file read when none is configured.
pub const DEFAULT_SOURCE_FILE: &str = ".env0";

/// Environment variable naming the vault.
pub const VAULT_ENV_VAR: &str = "ENV0_VAULT";

/// Environment variable listing source files, comma-separated.
pub const FILES_ENV_VAR: &str = "ENV0_FILES";

/// Settings for [`LoadEnvs`](crate::use_cases::LoadEnvs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoaderConfig {
    /// Vault to query. Adapters may require it.
    pub vault: Option<String>,

    /// Source files, lowest precedence first.
    pub files: Vec<PathBuf>,

    /// Whether to read `files` at all; inline entries are always applied.
    pub read_files: bool,

    /// Whether to apply `.local` companions.
    pub resolve_local_overrides: bool,

    /// How lookups are issued.
    pub schedule: LookupSchedule,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            vault: None,
            files: vec![PathBuf::from(DEFAULT_SOURCE_FILE)],
            read_files: true,
            resolve_local_overrides: true,
            schedule: LookupSchedule::default(),
        }
    }
}

impl LoaderConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `ENV0_VAULT` and `ENV0_FILES`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().merge_env(|name| std::env::var(name).ok())
    }

    /// Applies overrides from an environment lookup function.
    ///
    /// Empty values are ignored.
    #[must_use]
    pub fn merge_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(vault) = lookup(VAULT_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            self.vault = Some(vault.trim().to_string());
        }

        if let Some(files) = lookup(FILES_ENV_VAR) {
            let files: Vec<PathBuf> = files
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(PathBuf::from)
                .collect();
            if !files.is_empty() {
                self.files = files;
            }
        }

        self
    }

    /// Sets the vault name.
    #[must_use]
    pub fn with_vault(mut self, vault: impl Into<String>) -> Self {
        self.vault = Some(vault.into());
        self
    }

    /// Replaces the source file list.
    #[must_use]
    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables reading source files.
    #[must_use]
    pub fn with_read_files(mut self, read_files: bool) -> Self {
        self.read_files = read_files;
        self
    }

    /// Enables or disables `.local` companions.
    #[must_use]
    pub fn with_local_overrides(mut self, enabled: bool) -> Self {
        self.resolve_local_overrides = enabled;
        self
    }

    /// Sets the lookup schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: LookupSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Options passed to the source aggregator.
    #[must_use]
    pub const fn parse_files_options(&self) -> ParseFilesOptions {
        ParseFilesOptions {
            resolve_local_overrides: self.resolve_local_overrides,
        }
    }
}
