//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod source_reader;
mod vault;

pub use source_reader::SourceReader;
pub use vault::{Vault, VaultError};
