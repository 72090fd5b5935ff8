//! # Sealed envelopes for gamepow submissions.
//!
//! A submission record is serialized to canonical JSON and encrypted
//! under the game server's RSA public key with OAEP (SHA-256 digest,
//! MGF1-SHA-256, empty label). The ciphertext travels as standard
//! base64. Only the server holds the private key; nothing in this
//! crate decrypts.

pub mod error;
pub mod key;
pub mod seal;

pub use error::EncryptionFailure;
pub use key::{EnvelopeConfig, KeyMaterial, OAEP_DIGEST_LEN, PUBLIC_KEY_ENV};
pub use seal::{canonicalize, seal, Envelope, EnvelopeSealer};
