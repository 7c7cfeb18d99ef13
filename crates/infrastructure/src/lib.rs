//! env0 Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod persistence;
pub mod telemetry;

pub use adapters::{InMemoryVault, OnePasswordVault};
pub use persistence::{LocalSourceReader, load, parse_file, parse_files};
pub use telemetry::{TelemetryError, init_tracing};
