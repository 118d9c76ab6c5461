use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _,
    PasswordVerifier, Version,
};
use rand_core::OsRng;
use std::fmt;

use crate::errors::StoreError;

/// One-way adaptive password hashing (Argon2id)
///
/// Every digest gets a fresh random salt; the process-wide pepper is fed
/// to Argon2 as its secret parameter, so digests cannot be verified
/// without it. Plaintext is never stored, logged, or returned.
pub struct PasswordHasher {
    pepper: String,
}

impl PasswordHasher {
    pub fn new(pepper: String) -> Self {
        Self { pepper }
    }

    fn argon2(&self) -> Result<Argon2<'_>, StoreError> {
        Argon2::new_with_secret(
            self.pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| StoreError::Hashing(format!("Failed to initialize Argon2: {}", e)))
    }

    /// Hash a plaintext password into a PHC-format digest
    pub fn hash(&self, plaintext: &str) -> Result<String, StoreError> {
        let salt = SaltString::generate(&mut OsRng);

        let digest = self
            .argon2()?
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| StoreError::Hashing(format!("Password hashing error: {}", e)))?
            .to_string();

        Ok(digest)
    }

    /// Verify a plaintext password against a stored digest
    ///
    /// Any parse or verification failure counts as a mismatch; callers
    /// map that to their own uniform credentials error.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        let Ok(argon2) = self.argon2() else {
            return false;
        };
        argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("pepper", &"<redacted>")
            .finish()
    }
}
