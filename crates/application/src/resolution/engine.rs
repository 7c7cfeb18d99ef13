//! Secret resolution engine
//!
//! Resolves merged expressions to final values against a [`Vault`].
//! Literals resolve immediately. Lookups are scheduled per
//! [`LookupSchedule`]; every lookup runs to completion and failures are
//! reported together.

use std::collections::BTreeMap;

use env0_domain::{Expression, ExpressionKind};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use super::lookup::Lookup;
use crate::error::{LookupFailure, ResolutionError};
use crate::ports::Vault;

/// Resolved environment: key to final value, in ascending key order.
pub type ResolvedEnvs = BTreeMap<String, String>;

/// How lookups are issued to the vault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupSchedule {
    /// Resolve the first lookup alone, then all remaining ones concurrently.
    ///
    /// The first vault call may prompt for an unlock; running it alone keeps
    /// concurrent calls from racing several prompts.
    #[default]
    PrimeThenFanOut,

    /// Issue every lookup concurrently.
    FanOut,
}

/// Resolves expressions against a vault.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionEngine {
    schedule: LookupSchedule,
}

impl ResolutionEngine {
    /// Creates an engine with the default schedule.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            schedule: LookupSchedule::PrimeThenFanOut,
        }
    }

    /// Sets the lookup schedule.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: LookupSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Returns the lookup schedule.
    #[must_use]
    pub const fn schedule(&self) -> LookupSchedule {
        self.schedule
    }

    /// Resolves every expression to its final value.
    ///
    /// The "first" lookup is the first one `expressions` yields; for a
    /// [`ParseResult`](env0_domain::ParseResult) that is the smallest key.
    ///
    /// # Errors
    /// Returns [`ResolutionError::Aggregated`] listing every failed lookup if
    /// any lookup failed. No partial mapping is returned.
    pub async fn resolve<'a, I, V>(
        &self,
        expressions: I,
        vault: &V,
    ) -> Result<ResolvedEnvs, ResolutionError>
    where
        I: IntoIterator<Item = &'a Expression>,
        V: Vault + ?Sized,
    {
        let mut values = ResolvedEnvs::new();
        let mut lookups = Vec::new();

        for expr in expressions {
            match &expr.kind {
                ExpressionKind::Literal { value } => {
                    values.insert(expr.key.clone(), value.clone());
                }
                _ => lookups.extend(Lookup::from_expression(expr)),
            }
        }

        let literal_count = values.len();
        let lookup_count = lookups.len();
        tracing::debug!(
            literals = literal_count,
            lookups = lookup_count,
            schedule = ?self.schedule,
            "Resolving expressions"
        );

        let outcomes = match self.schedule {
            LookupSchedule::PrimeThenFanOut => Self::prime_then_fan_out(lookups, vault).await,
            LookupSchedule::FanOut => join_all(lookups.into_iter().map(|l| l.run(vault))).await,
        };

        let mut failures: Vec<LookupFailure> = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok((key, value)) => {
                    values.insert(key, value);
                }
                Err(failure) => failures.push(failure),
            }
        }

        if !failures.is_empty() {
            tracing::warn!(
                failed = failures.len(),
                lookups = lookup_count,
                "Secret resolution failed"
            );
            return Err(ResolutionError::Aggregated { failures });
        }

        tracing::info!(
            literals = literal_count,
            secrets = lookup_count,
            "Resolved environment"
        );
        Ok(values)
    }

    async fn prime_then_fan_out<V: Vault + ?Sized>(
        lookups: Vec<Lookup>,
        vault: &V,
    ) -> Vec<Result<(String, String), LookupFailure>> {
        let mut rest = lookups.into_iter();
        let Some(first) = rest.next() else {
            return Vec::new();
        };

        tracing::debug!(key = %first.key(), "Priming vault with first lookup");
        let mut outcomes = vec![first.run(vault).await];
        outcomes.extend(join_all(rest.map(|l| l.run(vault))).await);
        outcomes
    }
}

/// Resolves expressions with the default [`ResolutionEngine`].
///
/// # Errors
/// See [`ResolutionEngine::resolve`].
pub async fn resolve<'a, I, V>(expressions: I, vault: &V) -> Result<ResolvedEnvs, ResolutionError>
where
    I: IntoIterator<Item = &'a Expression>,
    V: Vault + ?Sized,
{
    ResolutionEngine::new().resolve(expressions, vault).await
}
