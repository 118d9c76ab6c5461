use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::fmt;
use std::sync::Arc;

use crate::config::AuthSecrets;
use crate::errors::StoreError;
use crate::types::internal::auth::Claims;

/// Issues and verifies signed, self-contained session tokens
///
/// Tokens embed identity claims and expiry, so verification is pure
/// computation against the signing key with no datastore lookup. The key
/// is injected at construction; there is no process-wide singleton and no
/// revocation list (a token stays valid until its expiry).
pub struct TokenService {
    secrets: Arc<AuthSecrets>,
    validity_hours: i64,
}

impl TokenService {
    pub fn new(secrets: Arc<AuthSecrets>) -> Self {
        Self {
            secrets,
            validity_hours: 24,
        }
    }

    /// Issue a signed session token for the given user
    ///
    /// # Returns
    /// * `Result<String, StoreError>` - The encoded JWT or a signing error
    pub fn issue(&self, user_id: &str, email: &str, role: &str) -> Result<String, StoreError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.validity_hours * 60 * 60,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secrets.jwt_secret().as_bytes()),
        )
        .map_err(|e| StoreError::Signing(format!("Failed to sign token: {}", e)))
    }

    /// Verify a session token and return its claims
    ///
    /// Fails with `TokenExpired` when the expiry has passed and
    /// `TokenInvalid` for a bad signature or malformed token.
    pub fn verify(&self, token: &str) -> Result<Claims, StoreError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secrets.jwt_secret().as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => StoreError::TokenExpired,
            _ => StoreError::TokenInvalid,
        })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secrets", &"<redacted>")
            .field("validity_hours", &self.validity_hours)
            .finish()
    }
}

impl fmt::Display for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenService {{ validity: {}h }}", self.validity_hours)
    }
}
