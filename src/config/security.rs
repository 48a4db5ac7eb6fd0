use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate};

/// Security configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// CORS configuration
    #[serde(default = "CorsConfig::default")]
    pub cors: CorsConfig,
}

/// CORS (Cross-Origin Resource Sharing) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Enable CORS
    #[serde(default = "default_cors_enabled")]
    pub enabled: bool,
    /// Allowed origins (e.g., ["https://example.com", "*"])
    #[serde(default = "default_cors_origins")]
    pub origins: Vec<String>,
    /// Allowed HTTP methods
    #[serde(default = "default_cors_methods")]
    pub methods: Vec<String>,
    /// Allowed HTTP headers
    #[serde(default = "default_cors_headers")]
    pub headers: Vec<String>,
    /// Max age in seconds for preflight requests
    #[serde(default = "default_cors_max_age")]
    pub max_age: usize,
}

fn default_cors_enabled() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_cors_methods() -> Vec<String> {
    vec!["GET".to_string(), "POST".to_string(), "PATCH".to_string()]
}

fn default_cors_headers() -> Vec<String> {
    vec!["Authorization".to_string(), "Content-Type".to_string()]
}

fn default_cors_max_age() -> usize {
    3600 // 1 hour
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: default_cors_enabled(),
            origins: default_cors_origins(),
            methods: default_cors_methods(),
            headers: default_cors_headers(),
            max_age: default_cors_max_age(),
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.origins.iter().any(|origin| origin == "*")
    }
}

impl Validate for SecurityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.cors.validate()
    }
}

impl Validate for CorsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.origins.is_empty() {
            return Err(ConfigError::ValidationError(
                "security.cors.origins cannot be empty when CORS is enabled".to_string(),
            ));
        }
        if self.max_age == 0 {
            return Err(ConfigError::ValidationError(
                "security.cors.max_age must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
