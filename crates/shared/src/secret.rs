//! Shared-secret verification for device callers.

use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verifies a caller-supplied API key against the configured shared secret.
///
/// Both sides are hashed before comparison so the check does not
/// short-circuit on the first differing byte of the secret itself.
pub fn verify_api_key(expected: &str, provided: Option<&str>) -> bool {
    match provided {
        Some(key) if !key.is_empty() => sha256_hex(expected) == sha256_hex(key),
        _ => false,
    }
}
