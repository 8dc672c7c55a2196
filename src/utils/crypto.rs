use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use subtle::ConstantTimeEq;

use crate::error::{Error, Result};

pub fn hash_secret(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Internal(format!("password hashing failed: {e}")))
}

pub fn verify_secret(plain: &str, hashed: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hashed)
        .map_err(|e| Error::Internal(format!("stored hash is malformed: {e}")))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Compares two secrets without short-circuiting on the first differing byte.
pub fn secrets_match(given: &str, expected: &str) -> bool {
    !expected.is_empty() && bool::from(given.as_bytes().ct_eq(expected.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_secret("hunter2").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_secret("hunter2", &hash).unwrap());
        assert!(!verify_secret("hunter3", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_secret("x", "not-a-phc-string").is_err());
    }

    #[test]
    fn secrets_match_requires_exact_bytes() {
        assert!(secrets_match("ADMIN-KEY", "ADMIN-KEY"));
        assert!(!secrets_match("ADMIN-KE", "ADMIN-KEY"));
        assert!(!secrets_match("", ""));
    }
}
