//! # gamepow
//!
//! Proof-of-effort challenges for game-result submissions, and the
//! sealed envelope the result travels in.
//!
//! ```no_run
//! use gamepow::{generate, seal, KeyMaterial, SubmissionRecord, DEFAULT_DIFFICULTY};
//!
//! let key = KeyMaterial::from_env_default()?;
//! let result = generate("abcd-efghi-jklmno-292ddhdjh", DEFAULT_DIFFICULTY)?;
//! let record = SubmissionRecord::new("abcd-efghi-jklmno-292ddhdjh".into(), result.solution())
//!     .with_points("BP", 169)
//!     .with_asset_clicks("CLOVER", 169);
//! let envelope = seal(&record, &key)?;
//! println!("{}", envelope);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use gamepow_core::*;
pub use gamepow_envelope::{
    canonicalize, seal, EncryptionFailure, Envelope, EnvelopeConfig, EnvelopeSealer, KeyMaterial,
    PUBLIC_KEY_ENV,
};
