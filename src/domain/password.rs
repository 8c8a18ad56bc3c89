//! Password hashing for the credential store.
//!
//! New passwords are hashed with Argon2id (memory-hard, random salt per
//! user) and stored as PHC strings. Unsalted SHA-256 hex digests written by
//! earlier installs are still accepted on verification so existing user
//! files keep working, but they are never produced.

use std::sync::OnceLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use thiserror::Error;

use super::digest::{constant_time_eq_str, sha256_hex};

/// Length of a hex-encoded SHA-256 digest.
const LEGACY_DIGEST_LEN: usize = 64;

/// Errors while hashing a password.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(47104, 1, 1, Some(32))
        .map_err(|e| PasswordError::Hashing(format!("Invalid Argon2 params: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// # Errors
/// Returns error if the Argon2 computation fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Argon2 hash of a fixed string, computed once with the production parameters.
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("cardiogate-dummy").ok())
        .as_deref()
}

/// Run one Argon2 verification that never succeeds.
///
/// Used when a username is unknown, so a failed login costs the same
/// whether or not the account exists.
pub fn verify_dummy(password: &str) {
    if let Some(hash) = dummy_hash() {
        let _ = verify_password(password, hash);
    }
}

/// Whether a stored hash is an unsalted SHA-256 hex digest.
#[must_use]
pub fn is_legacy_digest(stored: &str) -> bool {
    stored.len() == LEGACY_DIGEST_LEN && stored.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Check a password against a stored hash.
///
/// Unknown or unparsable hash formats never verify.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    if stored.starts_with("$argon2") {
        let parsed = match PasswordHash::new(stored) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("Unparsable Argon2 hash in credential store: {e}");
                return false;
            }
        };
        // Parameters come from the PHC string, not from `hasher()`.
        return Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();
    }

    if is_legacy_digest(stored) {
        let digest = sha256_hex(password.as_bytes());
        let matched = constant_time_eq_str(&digest, &stored.to_ascii_lowercase());
        if matched {
            tracing::warn!("Login verified against a legacy unsalted SHA-256 credential");
        }
        return matched;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret1").expect("Hashing should succeed");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_salts_differ() {
        let h1 = hash_password("same").expect("Hashing should succeed");
        let h2 = hash_password("same").expect("Hashing should succeed");
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_empty_password_hashes() {
        let hash = hash_password("").expect("Hashing should succeed");
        assert!(verify_password("", &hash));
        assert!(!verify_password(" ", &hash));
    }

    #[test]
    fn test_legacy_sha256_digest() {
        // sha256("secret1")
        let stored = "5b11618c2e44027877d0cd0921ed166b9f176f50587fc91e7534dd2946db77d6";
        assert!(is_legacy_digest(stored));
        assert!(verify_password("secret1", stored));
        assert!(!verify_password("secret2", stored));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(!verify_password("secret1", "plaintext"));
        assert!(!verify_password("secret1", "$argon2id$garbage"));
        assert!(!is_legacy_digest("xyz"));
    }

    #[test]
    fn test_dummy_hash_uses_production_params() {
        let hash = dummy_hash().expect("Hashing should succeed");
        assert!(hash.starts_with("$argon2id$v=19$m=47104,t=1,p=1$"));
        assert!(!verify_password("secret1", hash));
        verify_dummy("secret1");
    }
}
