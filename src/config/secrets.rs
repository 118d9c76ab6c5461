use std::env;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVariable(&'static str),

    #[error("{0} must be at least {1} characters")]
    SecretTooShort(&'static str, usize),
}

/// Process-wide secrets, loaded once in main and passed explicitly to the
/// services that need them. Nothing reads the environment after startup,
/// so tests can construct distinct secrets per scenario.
pub struct AuthSecrets {
    jwt_secret: String,
    password_pepper: String,
}

impl AuthSecrets {
    const MIN_SECRET_LEN: usize = 32;

    pub fn new(jwt_secret: String, password_pepper: String) -> Self {
        Self {
            jwt_secret,
            password_pepper,
        }
    }

    /// Load secrets from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is absent or the JWT secret
    /// is too short to be a usable signing key.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVariable("JWT_SECRET"))?;
        if jwt_secret.len() < Self::MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort(
                "JWT_SECRET",
                Self::MIN_SECRET_LEN,
            ));
        }

        let password_pepper = env::var("PASSWORD_PEPPER")
            .map_err(|_| ConfigError::MissingVariable("PASSWORD_PEPPER"))?;

        Ok(Self::new(jwt_secret, password_pepper))
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }
}

impl fmt::Debug for AuthSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSecrets")
            .field("jwt_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}
