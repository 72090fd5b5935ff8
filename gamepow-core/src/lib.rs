//! # Core functionality for the gamepow proof-of-effort scheme.
//!
//! A client proves effort for a challenge identifier by finding the
//! smallest nonce such that `SHA-256(identifier ++ decimal(nonce))`
//! in hex starts with `difficulty` zeros. The server checks the claim
//! with [`verify`], which recomputes the hash from scratch.
//!
//! Generation and verification are pure functions of their inputs
//! and share no state, so independent challenges can be solved on
//! as many threads as are available.

pub mod config;
pub mod error;
pub mod hash;
pub mod solve;
pub mod verify;

pub use gamepow_types::*; // Re-export types from gamepow-types

pub use config::{
    expected_attempts, recommended_attempts, SolverConfig, CHUNK_SIZE, DEFAULT_DIFFICULTY,
    MAX_DIFFICULTY,
};
pub use error::{PowError, VerificationFailure};
pub use hash::{calculate_hash, digest, digest_hex};
#[cfg(feature = "parallel")]
pub use solve::{generate_batch, generate_parallel};
pub use solve::{generate, generate_with};
pub use verify::{check, check_submission, parse_nonce, verify, verify_result, verify_solution};
