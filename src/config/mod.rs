pub mod app;
pub mod auth;
pub mod database;
pub mod observability;
pub mod security;
pub mod server;

pub use app::{ApiConfig, AppConfig, AppMetadata};
pub use auth::{Argon2Config, AuthConfig};
pub use database::DatabaseConfig;
pub use observability::ObservabilityConfig;
pub use security::{CorsConfig, SecurityConfig};
pub use server::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] ::config::ConfigError),
    #[error("{0}")]
    ValidationError(String),
}

/// Sanity checks run after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Load the application configuration from files and environment variables
pub fn load() -> Result<AppConfig, ConfigError> {
    app::load_config()
}
