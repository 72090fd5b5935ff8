//! SHA-256 hashing for challenge inputs.
//!
//! A challenge input is the identifier bytes followed by the nonce
//! as a decimal string, with no separator and no leading zeros:
//! `"test"` with nonce `25` hashes the bytes `"test25"`.

use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Length of the raw digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// SHA-256 of arbitrary bytes.
pub fn digest(bytes: &[u8]) -> [u8; DIGEST_LEN] {
    Sha256::digest(bytes).into()
}

/// SHA-256 of arbitrary bytes as lowercase hex.
pub fn digest_hex(bytes: &[u8]) -> String {
    hex::encode(digest(bytes))
}

/// Digest of `identifier ++ decimal(nonce)`.
pub fn challenge_digest(identifier: &str, nonce: u64) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(identifier.as_bytes());
    hasher.update(nonce.to_string().as_bytes());
    hasher.finalize().into()
}

/// Calculate the hex hash for a given identifier and nonce.
///
/// # Returns
/// * Lowercase hexadecimal SHA-256 (64 chars long).
pub fn calculate_hash(identifier: &str, nonce: u64) -> String {
    hex::encode(challenge_digest(identifier, nonce))
}

/// Number of leading zero hex characters in a digest, counted
/// on the raw bytes so the search loop never has to hex-encode
/// a losing candidate.
pub fn leading_zero_nibbles(digest: &[u8]) -> usize {
    let mut count = 0;
    for &byte in digest {
        if byte == 0 {
            count += 2;
            continue;
        }
        if byte >> 4 == 0 {
            count += 1;
        }
        break;
    }
    count
}

/// True if the hex form of `digest` starts with `difficulty` zeros.
pub fn meets_difficulty(digest: &[u8], difficulty: usize) -> bool {
    leading_zero_nibbles(digest) >= difficulty
}

/// Hashes many nonces for one identifier.
///
/// The identifier is absorbed once and the hasher state cloned per
/// nonce; the decimal buffer is reused between calls.
#[derive(Clone)]
pub struct ChallengeHasher {
    prefix: Sha256,
    buffer: String,
}

impl ChallengeHasher {
    pub fn new(identifier: &str) -> Self {
        Self {
            prefix: Sha256::new_with_prefix(identifier.as_bytes()),
            buffer: String::with_capacity(20),
        }
    }

    pub fn digest(&mut self, nonce: u64) -> [u8; DIGEST_LEN] {
        self.buffer.clear();
        // Writing into a String cannot fail.
        let _ = write!(self.buffer, "{}", nonce);

        let mut hasher = self.prefix.clone();
        hasher.update(self.buffer.as_bytes());
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_known_vectors() {
        assert_eq!(
            digest_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            digest_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_calculation() {
        // "test" ++ "25", no separator.
        assert_eq!(calculate_hash("test", 25), digest_hex(b"test25"));
        assert_eq!(
            calculate_hash("test", 25),
            "0342840f6340d15691f4be1c0e0157fb0983992c4f436c18267d41dbe6bb74a2"
        );
        // No separator, so these are the same input bytes.
        assert_eq!(calculate_hash("test", 25), calculate_hash("test2", 5));
    }

    #[test]
    fn test_challenge_hasher_matches_one_shot() {
        let mut hasher = ChallengeHasher::new("abcd-efghi-jklmno-292ddhdjh");
        for nonce in [0u64, 9, 10, 46408, u64::MAX] {
            assert_eq!(
                hasher.digest(nonce),
                challenge_digest("abcd-efghi-jklmno-292ddhdjh", nonce),
                "Mismatch at nonce {}",
                nonce
            );
        }
    }

    #[test]
    fn test_leading_zero_nibbles() {
        assert_eq!(leading_zero_nibbles(&[0xff, 0x00]), 0);
        assert_eq!(leading_zero_nibbles(&[0x0f, 0x00]), 1);
        assert_eq!(leading_zero_nibbles(&[0x00, 0x10]), 2);
        assert_eq!(leading_zero_nibbles(&[0x00, 0x00, 0x01]), 5);
        assert_eq!(leading_zero_nibbles(&[0x00; DIGEST_LEN]), 64);

        let hash = calculate_hash("test", 304);
        let zeros = hash.bytes().take_while(|&b| b == b'0').count();
        assert_eq!(leading_zero_nibbles(&challenge_digest("test", 304)), zeros);
    }

    #[test]
    fn test_meets_difficulty() {
        let digest = challenge_digest("test", 304); // 009f...
        assert!(meets_difficulty(&digest, 0));
        assert!(meets_difficulty(&digest, 2));
        assert!(!meets_difficulty(&digest, 3));
        assert!(!meets_difficulty(&digest, 65));
    }
}
