//! Vault adapters

mod memory_vault;
mod one_password;

pub use memory_vault::InMemoryVault;
pub use one_password::{DEFAULT_PROGRAM, OnePasswordVault};
