use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate};

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection url, e.g. `sqlite://user-api.sqlite?mode=rwc` or `postgres://...`
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Apply pending migrations on startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_url() -> String {
    "sqlite://user-api.sqlite?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_run_migrations() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            run_migrations: default_run_migrations(),
        }
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::ValidationError("database.url cannot be empty".to_string()));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
