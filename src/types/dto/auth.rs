use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::user;

/// Request model for account registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address, unique across all accounts
    #[oai(validator(pattern = ".+@.+"))]
    pub email: String,

    /// Password, at least 6 characters
    #[oai(validator(min_length = 6))]
    pub password: String,

    /// Given name
    #[oai(rename = "firstName")]
    pub first_name: String,

    /// Family name
    #[oai(rename = "lastName")]
    pub last_name: String,
}

/// Request model for login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address
    #[oai(validator(pattern = ".+@.+"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Public view of a user account, never carries the password hash
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID (UUID)
    pub id: String,

    /// Email address
    pub email: String,

    /// Given name
    #[oai(rename = "firstName")]
    pub first_name: String,

    /// Family name
    #[oai(rename = "lastName")]
    pub last_name: String,

    /// Authorization role, "user" unless elevated
    pub role: String,

    /// Last successful login (Unix timestamp), absent before first login
    #[oai(rename = "lastLogin")]
    pub last_login: Option<i64>,

    /// Whether the account may authenticate
    #[oai(rename = "isActive")]
    pub is_active: bool,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            role: model.role,
            last_login: model.last_login,
            is_active: model.is_active,
        }
    }
}

/// Response model for register and login, token plus the account it names
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed JWT, valid for 24 hours
    pub token: String,

    /// The authenticated account
    pub user: UserResponse,
}

/// Response model for token verification
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// User ID the token was issued to
    pub user_id: String,

    /// Email claim carried in the token
    pub email: String,

    /// Role claim carried in the token
    pub role: String,
}

/// Request model for profile name/email updates
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// Given name
    #[oai(rename = "firstName")]
    pub first_name: String,

    /// Family name
    #[oai(rename = "lastName")]
    pub last_name: String,

    /// Email address, must not belong to another account
    #[oai(validator(pattern = ".+@.+"))]
    pub email: String,
}

/// Request model for password rotation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// The password currently on the account
    pub current_password: String,

    /// Replacement password, at least 6 characters
    #[oai(validator(min_length = 6))]
    pub new_password: String,
}

/// Generic success message body
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}
