//! Challenge generation: the client side of the scheme.

use crate::config::{SolverConfig, MAX_DIFFICULTY};
#[cfg(feature = "parallel")]
use crate::config::CHUNK_SIZE;
use crate::error::PowError;
use crate::hash::{meets_difficulty, ChallengeHasher, DIGEST_LEN};
use gamepow_types::ChallengeResult;
#[cfg(feature = "parallel")]
use gamepow_types::ChallengeIdentifier;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, warn};

/// Find the smallest nonce for `identifier` at `difficulty` using
/// sequential search with no attempt limit.
///
/// The nonce is appended to the identifier as a decimal string and
/// hashed with SHA-256; the first nonce whose hex hash starts with
/// `difficulty` zeros wins.
///
/// # Returns
/// * `Ok(ChallengeResult)` - The nonce, its hash, iteration count and elapsed time.
/// * `Err(PowError::DifficultyOutOfRange)` - If `difficulty` exceeds `MAX_DIFFICULTY`.
pub fn generate(identifier: &str, difficulty: usize) -> Result<ChallengeResult, PowError> {
    generate_with(identifier, difficulty, &SolverConfig::unbounded())
}

/// Sequential search honouring `config.max_attempts`.
///
/// # Returns
/// * `Err(PowError::Exhausted)` - If the budget runs out first.
pub fn generate_with(
    identifier: &str,
    difficulty: usize,
    config: &SolverConfig,
) -> Result<ChallengeResult, PowError> {
    check_difficulty(difficulty)?;

    let limit: u64 = config.attempt_limit();
    let started: Instant = Instant::now();
    let mut hasher = ChallengeHasher::new(identifier);

    for nonce in 0..limit {
        let digest = hasher.digest(nonce);

        if meets_difficulty(&digest, difficulty) {
            return Ok(solved(identifier, difficulty, nonce, digest, started));
        }
    }

    Err(exhausted(identifier, difficulty, limit))
}

/// Parallel search over a single identifier.
///
/// The nonce space is walked in consecutive batches of
/// `CHUNK_SIZE * threads` nonces; within a batch the leftmost hit
/// wins, so the returned nonce is the same one `generate_with`
/// finds. Runs on the current rayon pool; wrap the call in
/// `ThreadPool::install` to pick the thread count.
#[cfg(feature = "parallel")]
pub fn generate_parallel(
    identifier: &str,
    difficulty: usize,
    config: &SolverConfig,
) -> Result<ChallengeResult, PowError> {
    check_difficulty(difficulty)?;

    let limit: u64 = config.attempt_limit();
    let batch: u64 = CHUNK_SIZE.saturating_mul(rayon::current_num_threads() as u64);
    let started: Instant = Instant::now();
    let mut start: u64 = 0;

    while start < limit {
        let end: u64 = start.saturating_add(batch).min(limit);

        let hit = (start..end)
            .into_par_iter()
            .map_init(
                || ChallengeHasher::new(identifier),
                |hasher, nonce| (nonce, hasher.digest(nonce)),
            )
            .find_first(|(_, digest)| meets_difficulty(digest, difficulty));

        if let Some((nonce, digest)) = hit {
            return Ok(solved(identifier, difficulty, nonce, digest, started));
        }

        start = end;
    }

    Err(exhausted(identifier, difficulty, limit))
}

/// Solve many independent challenges at once, one rayon task each.
///
/// Results come back in the same order as `identifiers`.
#[cfg(feature = "parallel")]
pub fn generate_batch(
    identifiers: &[ChallengeIdentifier],
    difficulty: usize,
    config: &SolverConfig,
) -> Vec<Result<ChallengeResult, PowError>> {
    identifiers
        .par_iter()
        .map(|identifier| generate_with(identifier.as_str(), difficulty, config))
        .collect()
}

fn check_difficulty(difficulty: usize) -> Result<(), PowError> {
    if difficulty > MAX_DIFFICULTY {
        return Err(PowError::DifficultyOutOfRange {
            difficulty,
            max: MAX_DIFFICULTY,
        });
    }
    Ok(())
}

fn solved(
    identifier: &str,
    difficulty: usize,
    nonce: u64,
    digest: [u8; DIGEST_LEN],
    started: Instant,
) -> ChallengeResult {
    // nonce < limit <= u64::MAX, so this cannot overflow.
    let result = ChallengeResult::new(nonce, hex::encode(digest), nonce + 1, started.elapsed());

    debug!(
        identifier = %identifier,
        difficulty = difficulty as u64,
        nonce,
        iterations = result.iterations,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "challenge solved"
    );

    result
}

fn exhausted(identifier: &str, difficulty: usize, attempts: u64) -> PowError {
    warn!(
        identifier = %identifier,
        difficulty = difficulty as u64,
        attempts,
        "challenge search exhausted its attempt budget"
    );
    PowError::Exhausted { attempts, difficulty }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::calculate_hash;

    #[test]
    fn test_zero_difficulty_takes_one_attempt() {
        let result = generate("any-game-id", 0).unwrap();

        assert_eq!(result.nonce, 0);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.hash, calculate_hash("any-game-id", 0));
    }

    #[test]
    fn test_known_nonces() {
        let result = generate("test", 1).unwrap();
        assert_eq!(result.nonce, 25);
        assert_eq!(result.iterations, 26);
        assert_eq!(
            result.hash,
            "0342840f6340d15691f4be1c0e0157fb0983992c4f436c18267d41dbe6bb74a2"
        );

        let result = generate("test", 2).unwrap();
        assert_eq!(result.nonce, 304);
        assert!(result.hash.starts_with("009f"));

        let result = generate("test", 3).unwrap();
        assert_eq!(result.nonce, 338);
        assert!(result.hash.starts_with("000"));
    }

    #[test]
    fn test_default_difficulty_game_id() {
        let result = generate("abcd-efghi-jklmno-292ddhdjh", crate::DEFAULT_DIFFICULTY).unwrap();
        assert_eq!(result.nonce, 46408);
        assert_eq!(
            result.hash,
            "0000b49a0e4a9b462171108ce80c7251e637a350123778ab01cffd5163cecadc"
        );
    }

    #[test]
    fn test_result_is_deterministic() {
        let first = generate("repeatable", 2).unwrap();
        let second = generate("repeatable", 2).unwrap();
        assert_eq!(first.nonce, second.nonce);
        assert_eq!(first.hash, second.hash);
        assert_eq!(first.iterations, second.iterations);
    }

    #[test]
    fn test_iterations_grow_with_difficulty() {
        let mut previous = 0;
        for difficulty in 0..=3 {
            let result = generate("test", difficulty).unwrap();
            assert!(result.iterations >= previous, "Difficulty {} took fewer iterations", difficulty);
            assert_eq!(result.iterations, result.nonce + 1);
            previous = result.iterations;
        }
    }

    #[test]
    fn test_attempt_budget() {
        // "test" needs 26 attempts at difficulty 1.
        let tight = SolverConfig::unbounded().with_max_attempts(25);
        assert_eq!(
            generate_with("test", 1, &tight),
            Err(PowError::Exhausted { attempts: 25, difficulty: 1 })
        );

        let exact = SolverConfig::unbounded().with_max_attempts(26);
        assert_eq!(generate_with("test", 1, &exact).unwrap().nonce, 25);

        let none = SolverConfig::unbounded().with_max_attempts(0);
        assert!(matches!(
            generate_with("test", 0, &none),
            Err(PowError::Exhausted { attempts: 0, .. })
        ));
    }

    #[test]
    fn test_difficulty_out_of_range() {
        assert_eq!(
            generate("test", MAX_DIFFICULTY + 1),
            Err(PowError::DifficultyOutOfRange { difficulty: 65, max: 64 })
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let config = SolverConfig::unbounded();
        for (identifier, difficulty) in [("test", 1), ("test", 3), ("abcd-efghi-jklmno-292ddhdjh", 4)] {
            let sequential = generate_with(identifier, difficulty, &config).unwrap();
            let parallel = generate_parallel(identifier, difficulty, &config).unwrap();

            assert_eq!(parallel.nonce, sequential.nonce);
            assert_eq!(parallel.hash, sequential.hash);
            assert_eq!(parallel.iterations, sequential.iterations);
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_on_custom_pool() {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let result = pool
            .install(|| generate_parallel("test", 2, &SolverConfig::unbounded()))
            .unwrap();
        assert_eq!(result.nonce, 304);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_attempt_budget() {
        let tight = SolverConfig::unbounded().with_max_attempts(300);
        assert_eq!(
            generate_parallel("test", 2, &tight),
            Err(PowError::Exhausted { attempts: 300, difficulty: 2 })
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_generate_batch_keeps_order() {
        let identifiers: Vec<ChallengeIdentifier> =
            vec!["test".into(), "abcd-efghi-jklmno-292ddhdjh".into()];
        let results = generate_batch(&identifiers, 1, &SolverConfig::unbounded());

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().nonce, 25);
        assert_eq!(results[1].as_ref().unwrap().nonce, 13);
    }
}
