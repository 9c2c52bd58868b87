//! # Password hashing and verification: Argon2id
//!
//! The client only ever learns a password through the reset flow, so a
//! [`UserSession`](crate::UserSession) either has no password at all or an
//! Argon2id PHC string (`$argon2id$v=19$m=19456,t=2,p=1$...`) written by
//! [`hash_password`]. Plaintext is never stored.
//!
//! [`accepts`] is the login-side check used when `auth.require_password` is
//! on. Failures surface as [`HubError::PasswordHash`].

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::HubError;

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, HubError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| HubError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
///
/// `Ok(false)` on mismatch, `Err` if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, HubError> {
    let parsed = PasswordHash::new(hash).map_err(|e| HubError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Whether `candidate` may sign in against a session's stored password.
///
/// A session without a stored hash accepts any candidate.
pub fn accepts(stored: Option<&str>, candidate: &str) -> Result<bool, HubError> {
    match stored {
        Some(hash) => verify_password(candidate, hash),
        None => Ok(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Secret!1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Secret!1", &hash).unwrap());
        assert!(!verify_password("secret!1", &hash).unwrap());
    }

    #[test]
    fn test_accepts_without_stored_hash() {
        assert!(accepts(None, "anything").unwrap());
        let hash = hash_password("Secret!1").unwrap();
        assert!(accepts(Some(&hash), "Secret!1").unwrap());
        assert!(!accepts(Some(&hash), "nope").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("x", "plaintext").is_err());
    }
}
