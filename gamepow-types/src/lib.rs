//! # Shared types for the gamepow system.
//!
//! Used by the native solver/verifier, the envelope sealer
//! and the WebAssembly bindings.

pub mod challenge;
pub mod serde_utils;
pub mod submission;

pub use challenge::{ChallengeIdentifier, ChallengeResult, ChallengeSolution};
pub use submission::{AssetClicks, EarnedPoints, SubmissionRecord, SUBMISSION_VERSION};
