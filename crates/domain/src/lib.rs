//! env0 Domain - Core types
//!
//! This crate defines the expression language used to describe which
//! secrets to load, and the vault item model lookups are answered from.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod expression;
pub mod vault;

pub use error::ParseError;
pub use expression::{Expression, ExpressionKind, LookupTarget, ParseResult, parse, parse_entry};
pub use vault::{ItemField, NOTES_PURPOSE, VaultField, VaultItem};
