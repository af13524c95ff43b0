//! Password-reset token generation and hashing
//!
//! The plaintext token is handed to the user out of band; only its SHA-256
//! digest is persisted, and lookup is by digest. Matching therefore never
//! byte-compares secret material against attacker-controlled input.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Length of the raw reset token in bytes (256 bits of entropy).
const RESET_TOKEN_BYTES: usize = 32;

/// Generate a fresh reset token, hex-encoded (64 characters).
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hash a reset token for storage or lookup.
pub fn hash_reset_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_hex_and_long_enough() {
        let token = generate_reset_token();
        assert_eq!(token.len(), RESET_TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_reset_token(), generate_reset_token());
    }

    #[test]
    fn test_hash_is_deterministic_and_distinct() {
        let token = generate_reset_token();
        assert_eq!(hash_reset_token(&token), hash_reset_token(&token));
        assert_ne!(hash_reset_token(&token), token);
        assert_ne!(hash_reset_token(&token), hash_reset_token("other"));
    }
}
