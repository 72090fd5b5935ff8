//! # gamepow WebAssembly Module
//!
//! Interface for solving challenges and sealing submissions
//! from a browser game client.

use gamepow_core::{ChallengeResult, SolverConfig};
use gamepow_envelope::{EnvelopeSealer, KeyMaterial};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Result structure for challenge solutions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionResult {
    /// String representation of nonce (safe for JavaScript)
    nonce: String,
    /// The computed hash.
    hash: String,
    /// First 10 characters of the hash for quick verification.
    hash_prefix: String,
    /// String representation of the attempt count.
    iterations: String,
    elapsed_ms: f64,
}

impl SolutionResult {
    fn new(result: ChallengeResult) -> Self {
        let hash_prefix = result.hash.chars().take(10).collect();

        Self {
            nonce: result.nonce.to_string(),
            hash_prefix,
            iterations: result.iterations.to_string(),
            elapsed_ms: result.elapsed.as_secs_f64() * 1000.0,
            hash: result.hash,
        }
    }
}

/// Convert errors to JsValue with consistent formatting.
fn map_error(context: &str, error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, error))
}

/// Serialize a result to JsValue with error handling.
fn serialize_result(result: &SolutionResult) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(result)
        .map_err(|e| map_error("Serialization failed", e))
}

fn solution_for(
    identifier: &str,
    difficulty: usize,
    config: &SolverConfig,
) -> Result<SolutionResult, gamepow_core::PowError> {
    gamepow_core::generate_with(identifier, difficulty, config).map(SolutionResult::new)
}

fn seal_json(record_json: &str, public_key_b64: &str) -> Result<String, String> {
    let record: serde_json::Value = serde_json::from_str(record_json)
        .map_err(|e| format!("Record is not valid JSON: {}", e))?;
    let key = KeyMaterial::from_base64_pem(public_key_b64).map_err(|e| e.to_string())?;

    EnvelopeSealer::new(key)
        .seal(&record)
        .map(|envelope| envelope.into_string())
        .map_err(|e| e.to_string())
}

/// Solve a challenge.
///
/// # Arguments
/// * `identifier` - The challenge (game) identifier to solve.
/// * `difficulty` - Number of leading zeros required in the hash.
///
/// # Returns
/// A JavaScript object containing the solution details.
#[wasm_bindgen]
pub fn solve_challenge(identifier: &str, difficulty: usize) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let result = solution_for(identifier, difficulty, &SolverConfig::unbounded())
        .map_err(|e| map_error("Challenge solving failed", e))?;

    serialize_result(&result)
}

/// Solve a challenge, giving up after `max_attempts` nonces.
#[wasm_bindgen]
pub fn solve_challenge_bounded(
    identifier: &str,
    difficulty: usize,
    max_attempts: u64,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let config = SolverConfig::unbounded().with_max_attempts(max_attempts);
    let result = solution_for(identifier, difficulty, &config)
        .map_err(|e| map_error("Challenge solving failed", e))?;

    serialize_result(&result)
}

/// Verify a challenge solution.
///
/// # Arguments
/// * `identifier` - The original challenge identifier.
/// * `nonce_value` - The nonce value as a string.
/// * `difficulty` - The required difficulty level.
///
/// # Returns
/// `true` if the solution is valid, `false` otherwise.
#[wasm_bindgen]
pub fn verify_challenge(identifier: &str, nonce_value: &str, difficulty: usize) -> bool {
    gamepow_core::verify_solution(identifier, nonce_value, difficulty)
}

/// Verify a solution together with the hash the client claims for it.
#[wasm_bindgen]
pub fn verify_challenge_hash(
    identifier: &str,
    nonce_value: &str,
    difficulty: usize,
    claimed_hash: &str,
) -> bool {
    gamepow_core::parse_nonce(nonce_value)
        .map(|nonce| gamepow_core::verify(identifier, nonce, difficulty, Some(claimed_hash)))
        .unwrap_or(false)
}

/// Seal a submission record for the game server.
///
/// # Arguments
/// * `record_json` - The submission record as JSON text.
/// * `public_key_b64` - The server's PEM public key, base64-encoded.
///
/// # Returns
/// The base64 envelope, or an error string; never an empty envelope.
#[wasm_bindgen]
pub fn seal_submission(record_json: &str, public_key_b64: &str) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    seal_json(record_json, public_key_b64).map_err(|e| map_error("Sealing failed", e))
}

/// Log a message to the browser console.
///
/// # Arguments
/// * `message` - The message to log.
#[wasm_bindgen]
pub fn console_log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}
