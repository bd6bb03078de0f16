//! Cryptographic utilities shared across Gatehouse crates
//!
//! Provides hashing and verification for stored verification codes using
//! SHA-256 with random salts and constant-time comparison to prevent
//! timing attacks.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Hash a verification code for storage.
///
/// The produced format is `hex(salt):hex(sha256(code || salt))`. Codes are
/// never persisted in plain text.
pub fn hash_code(code: &str) -> String {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hasher.update(salt);
    let hash = hasher.finalize();

    format!("{}:{}", hex::encode(salt), hex::encode(hash))
}

/// Verify a submitted code against a stored hash using constant-time comparison.
///
/// The stored hash format is `hex(salt):hex(sha256(code || salt))`.
pub fn verify_code_hash(candidate_code: &str, stored_hash: &str) -> bool {
    // Parse stored hash: salt:hash
    let parts: Vec<&str> = stored_hash.split(':').collect();
    if parts.len() != 2 {
        return false;
    }

    let salt = match hex::decode(parts[0]) {
        Ok(salt) => salt,
        Err(_) => return false,
    };

    let hash = match hex::decode(parts[1]) {
        Ok(hash) => hash,
        Err(_) => return false,
    };

    // Compute hash of candidate code with stored salt
    let mut hasher = Sha256::new();
    hasher.update(candidate_code.as_bytes());
    hasher.update(&salt);
    let candidate_hash = hasher.finalize();

    // Constant-time comparison to prevent timing attacks
    if hash.len() != candidate_hash.len() {
        return false;
    }

    let mut result = 0u8;
    for (a, b) in hash.iter().zip(candidate_hash.iter()) {
        result |= a ^ b;
    }
    result == 0
}
