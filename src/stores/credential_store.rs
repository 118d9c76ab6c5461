use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::services::PasswordHasher;
use crate::types::db::user::{self, Entity as User};

/// Manages user identity records and their hashed secrets
pub struct CredentialStore {
    db: DatabaseConnection,
    hasher: PasswordHasher,
}

impl CredentialStore {
    pub fn new(db: DatabaseConnection, hasher: PasswordHasher) -> Self {
        Self { db, hasher }
    }

    /// Create a new user with a hashed secret
    ///
    /// The email uniqueness check is a case-sensitive exact match; a
    /// racing insert that trips the UNIQUE constraint maps to the same
    /// conflict error.
    ///
    /// # Returns
    /// * `Ok(user::Model)` - The created user (role "user", active)
    /// * `Err(StoreError::Conflict)` - Email already registered
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<user::Model, StoreError> {
        let existing = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(StoreError::Conflict("Email already registered".to_string()));
        }

        let password_hash = self.hasher.hash(password)?;
        let now = Utc::now().timestamp();

        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            role: Set("user".to_string()),
            last_login: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_user.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                StoreError::Conflict("Email already registered".to_string())
            }
            _ => StoreError::Database(e),
        })
    }

    /// Verify credentials and record the login time
    ///
    /// Fails with the same `InvalidCredentials` whether the email is
    /// unknown or the password mismatches, so callers cannot enumerate
    /// accounts.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<user::Model, StoreError> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or(StoreError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(StoreError::InvalidCredentials);
        }

        let mut active: user::ActiveModel = user.into();
        active.last_login = Set(Some(Utc::now().timestamp()));
        Ok(active.update(&self.db).await?)
    }

    /// Look up a user by id
    pub async fn get(&self, user_id: &str) -> Result<user::Model, StoreError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::UserNotFound)
    }

    /// Update name and email
    ///
    /// Fails with a conflict naming the email field when the new email
    /// already belongs to a different user.
    pub async fn update_profile(
        &self,
        user_id: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<user::Model, StoreError> {
        let taken = User::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Id.ne(user_id))
            .one(&self.db)
            .await?;

        if taken.is_some() {
            return Err(StoreError::Conflict("Email already taken".to_string()));
        }

        let user = self.get(user_id).await?;

        let mut active: user::ActiveModel = user.into();
        active.first_name = Set(first_name.to_string());
        active.last_name = Set(last_name.to_string());
        active.email = Set(email.to_string());
        active.updated_at = Set(Utc::now().timestamp());
        Ok(active.update(&self.db).await?)
    }

    /// Replace the stored secret after verifying the current one
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), StoreError> {
        let user = self.get(user_id).await?;

        if !self.hasher.verify(current_password, &user.password_hash) {
            return Err(StoreError::InvalidCredentials);
        }

        let password_hash = self.hasher.hash(new_password)?;

        let mut active: user::ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(Utc::now().timestamp());
        active.update(&self.db).await?;

        Ok(())
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("db", &"<connection>")
            .field("hasher", &"<redacted>")
            .finish()
    }
}
