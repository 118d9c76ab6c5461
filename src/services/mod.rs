pub mod password;
pub mod token_service;

pub use password::PasswordHasher;
pub use token_service::TokenService;
