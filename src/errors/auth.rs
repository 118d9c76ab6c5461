use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

use crate::errors::StoreError;

/// Standardized error response body for all endpoints
#[derive(Object, Debug)]
pub struct ErrorBody {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// HTTP-facing error type for the auth and profile endpoints
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Malformed or missing input
    #[oai(status = 400)]
    Validation(Json<ErrorBody>),

    /// Bad credentials or missing/invalid token; message stays generic
    #[oai(status = 401)]
    Unauthorized(Json<ErrorBody>),

    /// Authenticated but lacking the required role
    #[oai(status = 403)]
    Forbidden(Json<ErrorBody>),

    /// Referenced entity does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),

    /// Uniqueness violation
    #[oai(status = 409)]
    Conflict(Json<ErrorBody>),

    /// Internal failure; message never carries the underlying cause
    #[oai(status = 500)]
    Internal(Json<ErrorBody>),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::Validation(Json(ErrorBody {
            error: "validation_error".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    /// Uniform message for bad logins; never hints at which field was wrong
    pub fn invalid_credentials() -> Self {
        AuthError::Unauthorized(Json(ErrorBody {
            error: "invalid_credentials".to_string(),
            message: "Invalid email or password".to_string(),
            status_code: 401,
        }))
    }

    pub fn invalid_token() -> Self {
        AuthError::Unauthorized(Json(ErrorBody {
            error: "invalid_token".to_string(),
            message: "Invalid token".to_string(),
            status_code: 401,
        }))
    }

    pub fn forbidden() -> Self {
        AuthError::Forbidden(Json(ErrorBody {
            error: "forbidden".to_string(),
            message: "Insufficient permissions".to_string(),
            status_code: 403,
        }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AuthError::NotFound(Json(ErrorBody {
            error: "not_found".to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AuthError::Conflict(Json(ErrorBody {
            error: "conflict".to_string(),
            message: message.into(),
            status_code: 409,
        }))
    }

    pub fn internal() -> Self {
        AuthError::Internal(Json(ErrorBody {
            error: "internal_error".to_string(),
            message: "Internal server error".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::Validation(json) => json.0.message.clone(),
            AuthError::Unauthorized(json) => json.0.message.clone(),
            AuthError::Forbidden(json) => json.0.message.clone(),
            AuthError::NotFound(json) => json.0.message.clone(),
            AuthError::Conflict(json) => json.0.message.clone(),
            AuthError::Internal(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => AuthError::conflict(message),
            StoreError::InvalidCredentials => AuthError::invalid_credentials(),
            StoreError::UserNotFound => AuthError::not_found("User not found"),
            StoreError::BioNotFound => AuthError::not_found("Bio information not found"),
            StoreError::TokenInvalid | StoreError::TokenExpired => AuthError::invalid_token(),
            StoreError::Hashing(_)
            | StoreError::Signing(_)
            | StoreError::Transaction(_)
            | StoreError::Database(_) => {
                tracing::error!("internal store error: {}", err);
                AuthError::internal()
            }
        }
    }
}
