//! Canonical serialization and RSA-OAEP sealing.

use crate::error::EncryptionFailure;
use crate::key::KeyMaterial;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{CryptoRng, RngCore};
use rsa::Oaep;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Base64 ciphertext of exactly one sealed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(String);

impl Envelope {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Envelope {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Serializes `record` to its canonical byte form: compact JSON with
/// object keys in lexicographic order at every level.
///
/// Going through `serde_json::Value` sorts the keys, so two records
/// that are equal field by field always produce the same bytes no
/// matter how their types order fields.
pub fn canonicalize<T: Serialize + ?Sized>(record: &T) -> Result<Vec<u8>, EncryptionFailure> {
    let value: serde_json::Value = serde_json::to_value(record)?;
    Ok(serde_json::to_vec(&value)?)
}

/// Seals submissions under one public key.
///
/// The key is shared behind an `Arc`; clones of the sealer are cheap
/// and may be used from any number of threads at once.
#[derive(Debug, Clone)]
pub struct EnvelopeSealer {
    key: Arc<KeyMaterial>,
}

impl EnvelopeSealer {
    pub fn new(key: KeyMaterial) -> Self {
        Self { key: Arc::new(key) }
    }

    pub fn from_shared(key: Arc<KeyMaterial>) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &KeyMaterial {
        &self.key
    }

    /// Canonicalizes and encrypts `record`.
    ///
    /// # Returns
    /// * `Ok(Envelope)` - Base64 of the RSA-OAEP ciphertext.
    /// * `Err(EncryptionFailure)` - Nothing was sealed.
    pub fn seal<T: Serialize + ?Sized>(&self, record: &T) -> Result<Envelope, EncryptionFailure> {
        let plaintext: Vec<u8> = canonicalize(record).map_err(|e| self.failed(e))?;
        self.seal_bytes(&plaintext)
    }

    /// Encrypts an already serialized payload as is.
    pub fn seal_bytes(&self, plaintext: &[u8]) -> Result<Envelope, EncryptionFailure> {
        self.seal_bytes_with_rng(&mut rand::thread_rng(), plaintext)
    }

    /// Like [`seal_bytes`](Self::seal_bytes) with a caller-supplied RNG
    /// for the OAEP seed.
    pub fn seal_bytes_with_rng<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<Envelope, EncryptionFailure> {
        let max: usize = self.key.max_plaintext_len();
        if plaintext.len() > max {
            return Err(self.failed(EncryptionFailure::PlaintextTooLarge {
                len: plaintext.len(),
                max,
            }));
        }

        let ciphertext: Vec<u8> = self
            .key
            .public_key()
            .encrypt(rng, Oaep::new::<Sha256>(), plaintext)
            .map_err(|e| self.failed(e.into()))?;

        debug!(
            fingerprint = %self.key.fingerprint(),
            plaintext_len = plaintext.len() as u64,
            ciphertext_len = ciphertext.len() as u64,
            "sealed submission envelope"
        );

        Ok(Envelope(STANDARD.encode(ciphertext)))
    }

    fn failed(&self, error: EncryptionFailure) -> EncryptionFailure {
        warn!(
            fingerprint = %self.key.fingerprint(),
            error = %error,
            "failed to seal submission envelope"
        );
        error
    }
}

/// One-shot form of [`EnvelopeSealer::seal`].
pub fn seal<T: Serialize + ?Sized>(record: &T, key: &KeyMaterial) -> Result<Envelope, EncryptionFailure> {
    EnvelopeSealer::new(key.clone()).seal(record)
}
