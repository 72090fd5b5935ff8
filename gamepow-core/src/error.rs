use thiserror::Error;

/// Errors from challenge generation and verification.
///
/// All of them are local and recoverable: retry with a different
/// difficulty, budget, or nonce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PowError {
    /// The attempt budget ran out before a satisfying nonce was found.
    #[error("no solution within {attempts} attempts at difficulty {difficulty}")]
    Exhausted { attempts: u64, difficulty: usize },

    /// The difficulty can never be met by a 64-character hex digest.
    #[error("difficulty {difficulty} exceeds the maximum of {max}")]
    DifficultyOutOfRange { difficulty: usize, max: usize },

    #[error("verification failed: {0}")]
    VerificationFailed(#[from] VerificationFailure),
}

/// Reason a submitted solution was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationFailure {
    #[error("hash has {found} leading zeros, {required} required")]
    DifficultyNotMet { required: usize, found: usize },

    #[error("claimed hash does not match the recomputed hash")]
    HashMismatch,

    #[error("nonce {0:?} is not a canonical decimal integer")]
    MalformedNonce(String),
}
