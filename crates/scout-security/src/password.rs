//! Password hashing with Argon2
//!
//! New hashes are always Argon2 PHC strings. Older accounts may still carry
//! bcrypt hashes (`$2a$`, `$2b$`, `$2y$`), which are verified with bcrypt.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Verification failed")]
    VerificationFailed,
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        if Self::is_bcrypt(hash) {
            return bcrypt::verify(password, hash)
                .map_err(|e| PasswordError::HashError(e.to_string()));
        }

        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Whether the stored hash should be replaced with an Argon2 one.
    pub fn needs_rehash(hash: &str) -> bool {
        Self::is_bcrypt(hash)
    }

    fn is_bcrypt(hash: &str) -> bool {
        ["$2a$", "$2b$", "$2y$"].iter().any(|prefix| hash.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argon2_roundtrip() {
        let hash = PasswordService::hash("secret1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(PasswordService::verify("secret1", &hash).unwrap());
        assert!(!PasswordService::verify("secret2", &hash).unwrap());
        assert!(!PasswordService::needs_rehash(&hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = PasswordService::hash("secret1").unwrap();
        let b = PasswordService::hash("secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_legacy_bcrypt_hash_verifies() {
        let legacy = bcrypt::hash("password123", 4).unwrap();
        assert!(PasswordService::needs_rehash(&legacy));
        assert!(PasswordService::verify("password123", &legacy).unwrap());
        assert!(!PasswordService::verify("password124", &legacy).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(PasswordService::verify("x", "not-a-hash").is_err());
    }
}
