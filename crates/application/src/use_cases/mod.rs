//! Application use cases (business logic orchestration).

mod load_envs;

pub use load_envs::{LoadEnvs, LoadEnvsError, LoadEnvsOutput};
