//! Secret resolution
//!
//! Turns merged expressions into final key/value pairs using a
//! [`Vault`](crate::ports::Vault).

mod engine;
mod lookup;

pub use engine::{LookupSchedule, ResolutionEngine, ResolvedEnvs, resolve};
