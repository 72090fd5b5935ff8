//! Protocol constants and solver configuration.

use serde::{Deserialize, Serialize};

/// Difficulty the game client uses when none is configured.
pub const DEFAULT_DIFFICULTY: usize = 4;
/// A hex SHA-256 digest has 64 characters; nothing above this
/// can ever be satisfied.
pub const MAX_DIFFICULTY: usize = 64;
/// Number of nonce values handed to each rayon worker per batch.
pub const CHUNK_SIZE: u64 = 10_000;

/// Runtime knobs for the generator.
///
/// * `max_attempts`: Optional cap on the number of nonces tried.
///                   `None` searches the whole nonce space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SolverConfig {
    pub max_attempts: Option<u64>,
}

impl SolverConfig {
    /// No attempt limit.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Upper bound (exclusive) of the nonce range to search.
    pub fn attempt_limit(&self) -> u64 {
        self.max_attempts.unwrap_or(u64::MAX)
    }
}

/// Expected number of hashes for a difficulty: `16^difficulty`,
/// saturating at `u64::MAX`.
pub fn expected_attempts(difficulty: usize) -> u64 {
    u32::try_from(difficulty)
        .ok()
        .and_then(|exponent| 16u64.checked_pow(exponent))
        .unwrap_or(u64::MAX)
}

/// Returns the recommended number of attempts to budget for a difficulty.
///
/// Three times the expected value, which gives callers a reasonable
/// upper bound when picking `max_attempts`.
///
/// # Examples
/// * difficulty = 1 → recommended_attempts = 48
/// * difficulty = 4 → recommended_attempts = 196608
pub fn recommended_attempts(difficulty: usize) -> u64 {
    expected_attempts(difficulty).saturating_mul(3)
}
