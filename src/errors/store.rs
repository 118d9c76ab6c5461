use sea_orm::DbErr;
use thiserror::Error;

/// Errors produced by the store and service layer
///
/// Converted into HTTP responses at the API boundary via
/// `From<StoreError> for AuthError`; internal variants must never leak
/// their message to the client.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Uniqueness violation; the message names the conflicting field
    #[error("{0}")]
    Conflict(String),

    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user not found")]
    UserNotFound,

    #[error("bio information not found")]
    BioNotFound,

    /// Password hashing failure (entropy or parameter error)
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Token signing failure
    #[error("token signing failed: {0}")]
    Signing(String),

    /// Bad signature or malformed token
    #[error("invalid token")]
    TokenInvalid,

    #[error("token expired")]
    TokenExpired,

    /// A multi-step unit of work was rolled back
    #[error("transaction failed: {0}")]
    Transaction(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}
