//! One-way password hashing with Argon2id.
//!
//! Hashes are stored in PHC string format, salt included, so verification
//! needs nothing but the stored string.

use crate::error::OpError;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

pub fn salt_and_hash(password: &str) -> Result<String, OpError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| OpError::Hash(e.to_string()))
}

/// `false` for a wrong password; `Err` only for an unparseable hash.
pub fn verify(password: &str, hash: &str) -> Result<bool, OpError> {
    let parsed = PasswordHash::new(hash).map_err(|e| OpError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = salt_and_hash("hunter2").unwrap();
        assert!(verify("hunter2", &hash).unwrap());
        assert!(!verify("hunter3", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let a = salt_and_hash("hunter2").unwrap();
        let b = salt_and_hash("hunter2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify("hunter2", "not-a-phc-string").is_err());
    }
}
