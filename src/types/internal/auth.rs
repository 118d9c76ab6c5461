use serde::{Deserialize, Serialize};

use crate::errors::AuthError;

/// JWT claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Email at issuance time
    pub email: String,

    /// Role at issuance time ("user", "admin", ...)
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Verified identity injected into request handlers by the bearer checker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

impl AuthenticatedUser {
    /// Capability check for role-gated routes
    ///
    /// The auth gate itself never enforces roles; callers that need a
    /// specific role invoke this and surface the 403.
    pub fn require_role(&self, role: &str) -> Result<(), AuthError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AuthError::forbidden())
        }
    }
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}
