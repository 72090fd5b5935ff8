use thiserror::Error;

/// Why a submission could not be sealed.
///
/// Every variant means "submission not sent": no partial or
/// truncated ciphertext is ever produced alongside an error.
#[derive(Debug, Error)]
pub enum EncryptionFailure {
    /// The key-transport base64 layer did not decode.
    #[error("public key is not valid base64: {0}")]
    KeyTransport(#[from] base64::DecodeError),

    #[error("public key PEM is not valid UTF-8")]
    KeyNotUtf8,

    #[error("public key could not be parsed: {0}")]
    InvalidKey(String),

    #[error("environment variable {var} is not set")]
    MissingKey { var: String },

    #[error("record could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The canonical plaintext does not fit in one OAEP block.
    #[error("plaintext is {len} bytes but the key can seal at most {max}")]
    PlaintextTooLarge { len: usize, max: usize },

    #[error("RSA-OAEP encryption failed: {0}")]
    Crypto(#[from] rsa::Error),
}
