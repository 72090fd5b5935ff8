//! Verification functions for submitted challenge solutions.
//!
//! The verifier never trusts a hash supplied by the client: it
//! recomputes `SHA-256(identifier ++ decimal(nonce))` and only then
//! compares against the difficulty and any claimed hash.

use crate::error::{PowError, VerificationFailure};
use crate::hash::{challenge_digest, leading_zero_nibbles};
use gamepow_types::{ChallengeResult, SubmissionRecord};
use tracing::debug;

/// Verify that `nonce` solves the challenge at `difficulty`.
///
/// # Returns
/// * `true`  - If the recomputed hash has at least `difficulty` leading
///             zeros and equals `claimed_hash` when one is given.
/// * `false` - Otherwise.
pub fn verify(
    identifier: &str,
    nonce: u64,
    difficulty: usize,
    claimed_hash: Option<&str>,
) -> bool {
    check(identifier, nonce, difficulty, claimed_hash).is_ok()
}

/// Like [`verify`], but says why a solution was rejected.
///
/// # Returns
/// * `Ok(hash)` - The recomputed lowercase hex hash.
/// * `Err(PowError::VerificationFailed)` - With the failure reason.
pub fn check(
    identifier: &str,
    nonce: u64,
    difficulty: usize,
    claimed_hash: Option<&str>,
) -> Result<String, PowError> {
    let digest = challenge_digest(identifier, nonce);
    let found: usize = leading_zero_nibbles(&digest);

    if found < difficulty {
        debug!(
            identifier = %identifier,
            nonce,
            required = difficulty as u64,
            found = found as u64,
            "rejected solution below difficulty"
        );
        return Err(VerificationFailure::DifficultyNotMet {
            required: difficulty,
            found,
        }
        .into());
    }

    let hash: String = hex::encode(digest);

    if let Some(claimed) = claimed_hash {
        if claimed != hash {
            debug!(identifier = %identifier, nonce, "rejected solution with mismatched hash");
            return Err(VerificationFailure::HashMismatch.into());
        }
    }

    Ok(hash)
}

/// Verify a nonce as transmitted text.
///
/// Only the canonical decimal form is accepted (`"25"`, never
/// `"+25"` or `"025"`), since that is the exact string the solver
/// hashed.
pub fn verify_solution(identifier: &str, nonce_str: &str, difficulty: usize) -> bool {
    parse_nonce(nonce_str)
        .map(|nonce| verify(identifier, nonce, difficulty, None))
        .unwrap_or(false)
}

/// Parse a nonce in canonical decimal form.
pub fn parse_nonce(nonce_str: &str) -> Result<u64, PowError> {
    nonce_str
        .parse::<u64>()
        .ok()
        .filter(|nonce| nonce.to_string() == nonce_str)
        .ok_or_else(|| VerificationFailure::MalformedNonce(nonce_str.to_string()).into())
}

/// Verify a full generator result, hash included.
pub fn verify_result(identifier: &str, result: &ChallengeResult, difficulty: usize) -> bool {
    verify(identifier, result.nonce, difficulty, Some(result.hash.as_str()))
}

/// Server-side check of a decrypted submission: the embedded
/// solution must solve the record's own game id.
pub fn check_submission(record: &SubmissionRecord, difficulty: usize) -> Result<String, PowError> {
    check(
        record.game_id.as_str(),
        record.challenge.nonce,
        difficulty,
        Some(record.challenge.hash.as_str()),
    )
}
