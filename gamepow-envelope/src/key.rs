//! Public key material for sealing submissions.

use crate::error::EncryptionFailure;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::debug;

/// Environment variable read by [`KeyMaterial::from_env_default`].
pub const PUBLIC_KEY_ENV: &str = "GAMEPOW_PUBLIC_KEY";

/// Output length of the OAEP digest (SHA-256), in bytes.
pub const OAEP_DIGEST_LEN: usize = 32;

/// The game server's RSA public key.
///
/// Loaded once from a trusted source and never mutated. `Debug`
/// prints only the key size and fingerprint.
#[derive(Clone)]
pub struct KeyMaterial {
    key:         RsaPublicKey,
    fingerprint: String,
}

impl KeyMaterial {
    /// Parses a PEM public key, either SPKI (`BEGIN PUBLIC KEY`) or
    /// PKCS#1 (`BEGIN RSA PUBLIC KEY`).
    pub fn from_pem(pem: &str) -> Result<Self, EncryptionFailure> {
        let pem: &str = pem.trim();
        let key: RsaPublicKey = RsaPublicKey::from_public_key_pem(pem)
            .or_else(|spki_err| {
                RsaPublicKey::from_pkcs1_pem(pem).map_err(|pkcs1_err| {
                    EncryptionFailure::InvalidKey(format!(
                        "not SPKI ({}) nor PKCS#1 ({})",
                        spki_err, pkcs1_err
                    ))
                })
            })?;

        Self::from_key(key)
    }

    /// Parses the configuration form of the key: a PEM document that
    /// is itself base64-encoded. Whitespace in the outer layer is
    /// ignored, so the value may be wrapped across lines.
    pub fn from_base64_pem(encoded: &str) -> Result<Self, EncryptionFailure> {
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        let pem_bytes: Vec<u8> = STANDARD.decode(compact)?;
        let pem: String = String::from_utf8(pem_bytes).map_err(|_| EncryptionFailure::KeyNotUtf8)?;

        Self::from_pem(&pem)
    }

    /// Reads the base64-wrapped PEM from environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self, EncryptionFailure> {
        let encoded: String = std::env::var(var).map_err(|_| EncryptionFailure::MissingKey {
            var: var.to_string(),
        })?;

        Self::from_base64_pem(&encoded)
    }

    /// Reads the key from `GAMEPOW_PUBLIC_KEY`.
    pub fn from_env_default() -> Result<Self, EncryptionFailure> {
        Self::from_env(PUBLIC_KEY_ENV)
    }

    /// Wraps an already parsed key.
    pub fn from_key(key: RsaPublicKey) -> Result<Self, EncryptionFailure> {
        let der = key
            .to_public_key_der()
            .map_err(|e| EncryptionFailure::InvalidKey(e.to_string()))?;
        let fingerprint: String = hex::encode(Sha256::digest(der.as_bytes()));

        let material = Self { key, fingerprint };
        debug!(
            bits = material.bits() as u64,
            fingerprint = %material.fingerprint(),
            "loaded envelope public key"
        );
        Ok(material)
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.key
    }

    /// Modulus size in bytes.
    pub fn modulus_len(&self) -> usize {
        self.key.size()
    }

    pub fn bits(&self) -> usize {
        self.modulus_len() * 8
    }

    /// Largest plaintext one OAEP-SHA256 block can carry:
    /// `k - 2 * 32 - 2`.
    pub fn max_plaintext_len(&self) -> usize {
        self.modulus_len().saturating_sub(2 * OAEP_DIGEST_LEN + 2)
    }

    /// Lowercase hex SHA-256 of the DER-encoded SPKI key.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("bits", &self.bits())
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

/// Envelope settings as they appear in a configuration file.
///
/// * `public_key`: The PEM public key, base64-encoded once more for
///                 embedding as a single string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnvelopeConfig {
    pub public_key: String,
}

impl EnvelopeConfig {
    pub fn load_key(&self) -> Result<KeyMaterial, EncryptionFailure> {
        KeyMaterial::from_base64_pem(&self.public_key)
    }
}
