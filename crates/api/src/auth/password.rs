//! Argon2id password hashing and verification.
//!
//! Hashes use the Argon2id variant with a random salt from [`OsRng`] and are
//! stored in PHC string format, so the algorithm parameters travel with the
//! hash. Plaintext passwords exist only on the stack of these functions and
//! are never logged or persisted.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(false)` on a wrong password. A malformed stored hash is an
/// `Err` -- callers surface that as an internal error, never as "bad
/// credentials".
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Gate a password against the minimum length before hashing it.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("Secret1!").expect("hashing should succeed");
        assert!(
            hash.starts_with("$argon2id$"),
            "expected argon2id PHC prefix"
        );
        assert!(verify_password("Secret1!", &hash).expect("verify should succeed"));
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let hash = hash_password("Secret1!").expect("hashing should succeed");
        let verified = verify_password("Secret2!", &hash).expect("verify should succeed");
        assert!(!verified);
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("Secret1!").unwrap();
        let b = hash_password("Secret1!").unwrap();
        assert_ne!(a, b, "same password must not produce the same PHC string");
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("whatever", "not-a-phc-string").is_err());
    }

    #[test]
    fn strength_gate_at_boundary() {
        assert!(validate_password_strength("Secret1!", MIN_PASSWORD_LEN).is_ok());
        let err = validate_password_strength("short", MIN_PASSWORD_LEN).unwrap_err();
        assert!(err.contains("at least 8"), "got: {err}");
    }
}
