//! Load envs use case

use env0_domain::ParseResult;

use crate::config::LoaderConfig;
use crate::error::{ResolutionError, SourceError};
use crate::ports::{SourceReader, Vault};
use crate::resolution::{ResolutionEngine, ResolvedEnvs};
use crate::sources::{SourceAggregator, merge_entries};

/// Errors that can occur when loading envs.
#[derive(Debug, thiserror::Error)]
pub enum LoadEnvsError {
    /// A source file or inline entry could not be read or parsed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// One or more secrets could not be resolved.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

/// Output containing the resolved environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadEnvsOutput {
    /// Resolved values, sorted by key.
    pub envs: ResolvedEnvs,

    /// Number of literal expressions.
    pub literal_count: usize,

    /// Number of vault lookups performed.
    pub lookup_count: usize,
}

/// Reads the configured sources, applies inline entries and resolves
/// everything against the vault.
pub struct LoadEnvs<R, V> {
    aggregator: SourceAggregator<R>,
    vault: V,
    config: LoaderConfig,
}

impl<R: SourceReader, V: Vault> LoadEnvs<R, V> {
    /// Creates a new `LoadEnvs` use case.
    pub const fn new(reader: R, vault: V, config: LoaderConfig) -> Self {
        Self {
            aggregator: SourceAggregator::new(reader),
            vault,
            config,
        }
    }

    /// Returns the configuration in use.
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Merges sources and inline entries without resolving anything.
    ///
    /// # Errors
    /// Returns a [`SourceError`] if a source cannot be read or parsed.
    pub fn collect(&self, entries: &[impl AsRef<str>]) -> Result<ParseResult, SourceError> {
        let files = if self.config.read_files {
            self.aggregator
                .parse_files(self.config.files.as_slice(), self.config.parse_files_options())?
        } else {
            ParseResult::new()
        };

        merge_entries(files, entries)
    }

    /// Executes the use case.
    ///
    /// # Arguments
    /// * `entries` - Inline expressions, applied over the file sources
    ///
    /// # Errors
    /// Returns an error if a source is invalid or any secret cannot be resolved.
    pub async fn execute(
        &self,
        entries: &[impl AsRef<str>],
    ) -> Result<LoadEnvsOutput, LoadEnvsError> {
        let expressions = self.collect(entries)?;
        let literal_count = expressions.iter().filter(|e| e.is_literal()).count();
        let lookup_count = expressions.len() - literal_count;

        tracing::debug!(
            files = self.config.files.len(),
            entries = entries.len(),
            keys = expressions.len(),
            "Collected expressions"
        );

        let envs = ResolutionEngine::new()
            .with_schedule(self.config.schedule)
            .resolve(&expressions, &self.vault)
            .await?;

        Ok(LoadEnvsOutput {
            envs,
            literal_count,
            lookup_count,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::VaultError;
    use async_trait::async_trait;
    use env0_domain::VaultField;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};

    struct MockReader {
        files: HashMap<PathBuf, String>,
    }

    impl MockReader {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(p, c)| (PathBuf::from(p), (*c).to_string()))
                    .collect(),
            }
        }
    }

    impl SourceReader for MockReader {
        fn read_source(&self, path: &Path) -> io::Result<String> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
        }
    }

    struct MockVault {
        secrets: HashMap<String, String>,
    }

    impl MockVault {
        fn new(secrets: &[(&str, &str)]) -> Self {
            Self {
                secrets: secrets
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
            }
        }

        fn field(&self, name: &str) -> Option<VaultField> {
            self.secrets.get(name).map(|value| VaultField {
                field_type: "CONCEALED".to_string(),
                value: value.clone(),
            })
        }
    }

    #[async_trait]
    impl Vault for MockVault {
        async fn get_item(&self, identifier: &str) -> Result<Option<VaultField>, VaultError> {
            Ok(self.field(identifier))
        }

        async fn get_field(
            &self,
            item: &str,
            label: &str,
        ) -> Result<Option<VaultField>, VaultError> {
            Ok(self.field(&format!("{item}/{label}")))
        }
    }

    const NO_ENTRIES: &[&str] = &[];

    #[tokio::test]
    async fn test_load_from_default_file() {
        let reader = MockReader::new(&[(".env0", "MY_TEST_SECRET\n# IGNORED_SECRET")]);
        let vault = MockVault::new(&[("MY_TEST_SECRET", "test-value")]);

        let use_case = LoadEnvs::new(reader, vault, LoaderConfig::default());
        let output = use_case.execute(NO_ENTRIES).await.unwrap();

        assert_eq!(output.envs.len(), 1);
        assert_eq!(output.envs["MY_TEST_SECRET"], "test-value");
        assert_eq!(output.lookup_count, 1);
        assert_eq!(output.literal_count, 0);
    }

    #[tokio::test]
    async fn test_combines_file_and_inline_entries() {
        let reader = MockReader::new(&[(".env0", "MY_TEST_SECRET\n[item:db]\nHOST")]);
        let vault = MockVault::new(&[
            ("MY_TEST_SECRET", "test-value"),
            ("ANOTHER_SECRET", "another-value"),
            ("db/HOST", "db.internal"),
        ]);

        let use_case = LoadEnvs::new(reader, vault, LoaderConfig::default());
        let output = use_case
            .execute(&["ANOTHER_SECRET", "MODE=\"ci\""])
            .await
            .unwrap();

        let keys: Vec<&str> = output.envs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ANOTHER_SECRET", "HOST", "MODE", "MY_TEST_SECRET"]);
        assert_eq!(output.envs["HOST"], "db.internal");
        assert_eq!(output.literal_count, 1);
        assert_eq!(output.lookup_count, 3);
    }

    #[tokio::test]
    async fn test_inline_only_when_files_disabled() {
        let reader = MockReader::new(&[]);
        let vault = MockVault::new(&[("MY_TEST_SECRET", "test-value")]);
        let config = LoaderConfig::default().with_read_files(false);

        let use_case = LoadEnvs::new(reader, vault, config);
        let output = use_case.execute(&["MY_TEST_SECRET"]).await.unwrap();

        assert_eq!(output.envs["MY_TEST_SECRET"], "test-value");
    }

    #[tokio::test]
    async fn test_missing_file_is_source_error() {
        let use_case = LoadEnvs::new(MockReader::new(&[]), MockVault::new(&[]), LoaderConfig::default());
        let result = use_case.execute(NO_ENTRIES).await;
        assert!(matches!(
            result,
            Err(LoadEnvsError::Source(SourceError::FileRead { .. }))
        ));
    }

    #[tokio::test]
    async fn test_unresolved_secret_is_resolution_error() {
        let reader = MockReader::new(&[(".env0", "PRESENT\nABSENT")]);
        let vault = MockVault::new(&[("PRESENT", "yes")]);

        let use_case = LoadEnvs::new(reader, vault, LoaderConfig::default());
        let err = use_case.execute(NO_ENTRIES).await.unwrap_err();

        match err {
            LoadEnvsError::Resolution(e) => assert_eq!(e.failures().len(), 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
