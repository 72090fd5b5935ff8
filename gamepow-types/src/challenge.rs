use crate::serde_utils::{deserialize_duration_millis, deserialize_hash_hex, serialize_duration_millis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Opaque name of a single challenge instance, usually the game id
/// handed to the client by the server.
///
/// The identifier bytes are hashed verbatim, so two identifiers that
/// differ only in whitespace or case are different challenges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChallengeIdentifier(String);

impl ChallengeIdentifier {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    /// Issues a fresh identifier: 16 random bytes as lowercase hex.
    pub fn random() -> Self {
        Self(hex::encode(rand::random::<[u8; 16]>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ChallengeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChallengeIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChallengeIdentifier {
    fn from(identifier: &str) -> Self {
        Self::new(identifier)
    }
}

impl From<String> for ChallengeIdentifier {
    fn from(identifier: String) -> Self {
        Self(identifier)
    }
}

/// The part of a solved challenge that travels inside a submission.
///
/// * `nonce`: The winning nonce, hashed as its decimal string.
/// * `hash`:  Lowercase hex SHA-256 of `identifier ++ decimal(nonce)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeSolution {
    pub nonce: u64,
    #[serde(deserialize_with = "deserialize_hash_hex")]
    pub hash:  String,
}

impl ChallengeSolution {
    pub fn new(nonce: u64, hash: String) -> Self {
        Self { nonce, hash }
    }
}

/// Outcome of a challenge search.
///
/// * `nonce`:      Smallest nonce satisfying the difficulty.
/// * `hash`:       Lowercase hex digest for that nonce.
/// * `iterations`: Number of nonces tried, always `nonce + 1`.
/// * `elapsed`:    Wall-clock time spent searching, serialized
///                 as whole milliseconds under `timeTaken`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResult {
    pub nonce:      u64,
    #[serde(deserialize_with = "deserialize_hash_hex")]
    pub hash:       String,
    pub iterations: u64,
    #[serde(
        rename = "timeTaken",
        serialize_with = "serialize_duration_millis",
        deserialize_with = "deserialize_duration_millis"
    )]
    pub elapsed:    Duration,
}

impl ChallengeResult {
    pub fn new(nonce: u64, hash: String, iterations: u64, elapsed: Duration) -> Self {
        Self {
            nonce,
            hash,
            iterations,
            elapsed,
        }
    }

    /// Copies out the `{nonce, hash}` pair for a submission record.
    pub fn solution(&self) -> ChallengeSolution {
        ChallengeSolution::new(self.nonce, self.hash.clone())
    }

    /// Number of leading `'0'` characters in the hash.
    pub fn leading_zeros(&self) -> usize {
        self.hash.bytes().take_while(|&b| b == b'0').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_HASH: &str = "0342840f6340d15691f4be1c0e0157fb0983992c4f436c18267d41dbe6bb74a2";

    #[test]
    fn test_random_identifier() {
        let first = ChallengeIdentifier::random();
        let second = ChallengeIdentifier::random();

        assert_eq!(first.as_str().len(), 32);
        assert!(first.as_str().bytes().all(|b| b.is_ascii_hexdigit()));
        assert_ne!(first, second, "Random identifiers should not collide");
    }

    #[test]
    fn test_identifier_is_transparent() {
        let identifier = ChallengeIdentifier::from("abcd-efghi-jklmno-292ddhdjh");
        let json = serde_json::to_string(&identifier).unwrap();
        assert_eq!(json, "\"abcd-efghi-jklmno-292ddhdjh\"");
        assert_eq!(identifier.to_string(), "abcd-efghi-jklmno-292ddhdjh");
    }

    #[test]
    fn test_result_serialization() {
        let result = ChallengeResult::new(
            25,
            TEST_HASH.to_string(),
            26,
            Duration::from_millis(1500),
        );

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["nonce"], 25);
        assert_eq!(value["hash"], TEST_HASH);
        assert_eq!(value["iterations"], 26);
        assert_eq!(value["timeTaken"], 1500);

        let parsed: ChallengeResult = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, result);
        assert_eq!(parsed.leading_zeros(), 1);
        assert_eq!(parsed.solution(), ChallengeSolution::new(25, TEST_HASH.to_string()));
    }

    #[test]
    fn test_solution_rejects_malformed_hash() {
        let short = serde_json::json!({ "nonce": 1, "hash": "00ff" });
        assert!(serde_json::from_value::<ChallengeSolution>(short).is_err());

        let upper = serde_json::json!({ "nonce": 1, "hash": TEST_HASH.to_uppercase() });
        assert!(serde_json::from_value::<ChallengeSolution>(upper).is_err());
    }
}
