//! env0 Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (vault lookups, source reading)
//! - Source aggregation with local overrides and inline entries
//! - The resolution engine and its lookup schedule
//! - Use case orchestration
//! - Application-level error handling

pub mod config;
pub mod error;
pub mod ports;
pub mod resolution;
pub mod sources;
pub mod use_cases;

pub use config::LoaderConfig;
pub use error::{LookupFailure, ResolutionError, SourceError};
pub use ports::{SourceReader, Vault, VaultError};
pub use resolution::{LookupSchedule, ResolutionEngine, ResolvedEnvs, resolve};
pub use sources::{ParseFilesOptions, SourceAggregator};
pub use use_cases::{LoadEnvs, LoadEnvsError, LoadEnvsOutput};
