pub mod logging;
pub mod secrets;

pub use logging::init_logging;
pub use secrets::{AuthSecrets, ConfigError};
