//! Credential hashing for API keys.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Visible characters of a key kept for display (e.g., "sy_a1b2c3d4").
pub const KEY_PREFIX_LEN: usize = 11;

/// Generate a new bearer API key. Shown once; only its hash is stored.
pub fn generate_api_key() -> String {
    format!("sy_{}", Uuid::new_v4().as_simple())
}

/// Hash a secret for storage and lookup.
pub fn hash_secret(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"stockyard-v1:");
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
