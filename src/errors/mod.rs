pub mod auth;
pub mod store;

pub use auth::{AuthError, ErrorBody};
pub use store::StoreError;
