//! Cryptographic utilities shared across Garage crates
//!
//! Provides password hashing and verification using SHA-256 with random
//! salts and constant-time comparison to prevent timing attacks.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Hash collaborator consumed by the authentication and registration flows.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, plaintext: &str) -> String;

    /// Verify a plaintext password against a stored hash.
    fn verify(&self, plaintext: &str, stored_hash: &str) -> bool;
}

/// Salted SHA-256 hasher.
///
/// The stored hash format is `hex(salt):hex(sha256(password || salt))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaltedSha256;

impl PasswordHasher for SaltedSha256 {
    fn hash(&self, plaintext: &str) -> String {
        let mut salt = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt);

        let mut hasher = Sha256::new();
        hasher.update(plaintext.as_bytes());
        hasher.update(salt);
        let hash = hasher.finalize();

        format!("{}:{}", hex::encode(salt), hex::encode(hash))
    }

    fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        verify_password_hash(plaintext, stored_hash)
    }
}

/// Verify a password against a stored hash using constant-time comparison.
pub fn verify_password_hash(candidate: &str, stored_hash: &str) -> bool {
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

    // Compute hash of candidate password with stored salt
    let mut hasher = Sha256::new();
    hasher.update(candidate.as_bytes());
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
