use serde::{Deserialize, Serialize};

use super::{
    AuthConfig, ConfigError, DatabaseConfig, ObservabilityConfig, SecurityConfig, ServerConfig,
    Validate,
};

/// Top-level application configuration that aggregates all config modules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    #[serde(default)]
    pub app: AppMetadata,
    /// Server configuration (host, port, workers)
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration (url, pool size, migrations)
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration (password rules, Argon2)
    #[serde(default)]
    pub auth: AuthConfig,
    /// Security configuration (CORS)
    #[serde(default)]
    pub security: SecurityConfig,
    /// Observability configuration (log level, output format)
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// API configuration (Swagger)
    #[serde(default)]
    pub api: ApiConfig,
}

/// Application metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Application environment (development, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// API documentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Enable Swagger UI
    #[serde(default = "default_swagger_enabled")]
    pub swagger_enabled: bool,
    /// Swagger UI path
    #[serde(default = "default_swagger_path")]
    pub swagger_path: String,
}

fn default_app_name() -> String {
    "user-api".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_swagger_enabled() -> bool {
    true
}

fn default_swagger_path() -> String {
    "/docs".to_string()
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            environment: default_environment(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            swagger_enabled: default_swagger_enabled(),
            swagger_path: default_swagger_path(),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.app.validate()?;
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.security.validate()?;
        self.observability.validate()?;
        self.api.validate()?;
        Ok(())
    }
}

impl Validate for AppMetadata {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError("app.name cannot be empty".to_string()));
        }
        if self.environment.is_empty() {
            return Err(ConfigError::ValidationError("app.environment cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.swagger_enabled && !self.swagger_path.starts_with('/') {
            return Err(ConfigError::ValidationError(
                "api.swagger_path must start with '/' when swagger is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from files and environment variables
///
/// Configuration loading follows this precedence (highest to lowest):
/// 1. Environment variables: USER_API__SERVER__PORT=8080
/// 2. config/local.toml (git-ignored, developer overrides)
/// 3. config/{APP_ENV}.toml (development/staging/production)
/// 4. config/default.toml (base defaults)
pub fn load_config() -> Result<AppConfig, ConfigError> {
    use ::config::{Config, Environment, File};

    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", env)).required(false))
        .add_source(File::with_name("config/local").required(false))
        .add_source(
            Environment::with_prefix("USER_API")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("security.cors.origins")
                .with_list_parse_key("security.cors.methods")
                .with_list_parse_key("security.cors.headers"),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate()?;

    Ok(app_config)
}
