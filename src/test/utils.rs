// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::AuthSecrets;
use crate::services::{PasswordHasher, TokenService};
use crate::stores::CredentialStore;
use crate::types::db::user;

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PEPPER: &str = "test-pepper-for-unit-tests";

/// Create an in-memory SQLite database with the full schema applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_secrets() -> Arc<AuthSecrets> {
    Arc::new(AuthSecrets::new(
        TEST_JWT_SECRET.to_string(),
        TEST_PEPPER.to_string(),
    ))
}

pub fn test_token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(test_secrets()))
}

pub fn test_credential_store(db: &DatabaseConnection) -> CredentialStore {
    CredentialStore::new(db.clone(), PasswordHasher::new(TEST_PEPPER.to_string()))
}

/// Register a user directly through the credential store
///
/// Child tables carry foreign keys to `users`, so tests that write
/// activities or bio rows need a real user row first.
pub async fn seed_user(db: &DatabaseConnection, email: &str) -> user::Model {
    test_credential_store(db)
        .register(email, "testpass", "Test", "User")
        .await
        .expect("Failed to seed test user")
}
