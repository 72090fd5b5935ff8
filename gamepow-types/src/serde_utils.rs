use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

/// Length of a lowercase hex SHA-256 digest.
pub const HASH_HEX_LEN: usize = 64;

/// Writes a `Duration` as whole milliseconds.
pub fn serialize_duration_millis<S>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
{
    let millis: u64 = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    serializer.serialize_u64(millis)
}

/// Reads whole milliseconds back into a `Duration`.
pub fn deserialize_duration_millis<'de, D>(
    deserializer: D
) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
{
    let millis: u64 = u64::deserialize(deserializer)?;
    Ok(Duration::from_millis(millis))
}

/// Reads a digest string, with validation to ensure it is
/// exactly 64 lowercase hex characters.
pub fn deserialize_hash_hex<'de, D>(
    deserializer: D
) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
{
    use serde::de::Error;
    let hash: String = String::deserialize(deserializer)?;

    if !is_hash_hex(&hash) {
        return Err(Error::custom(format!(
            "Expected {} lowercase hex characters, got {:?}",
            HASH_HEX_LEN, hash
        )));
    }

    Ok(hash)
}

/// True if `value` looks like a lowercase hex SHA-256 digest.
pub fn is_hash_hex(value: &str) -> bool {
    value.len() == HASH_HEX_LEN
        && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
