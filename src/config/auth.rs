use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shortest password accepted at registration and on profile update
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    /// Argon2 configuration
    #[serde(default = "Argon2Config::default")]
    pub argon2: Argon2Config,
}

/// Argon2 password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    /// Memory cost in KB (64MB = 65536 KB)
    #[serde(default = "default_argon2_memory_cost")]
    pub memory_cost: u32,
    /// Time cost (iterations)
    #[serde(default = "default_argon2_time_cost")]
    pub time_cost: u32,
    /// Parallelism (number of threads)
    #[serde(default = "default_argon2_parallelism")]
    pub parallelism: u32,
    /// Hash length in bytes
    #[serde(default = "default_argon2_hash_length")]
    pub hash_length: u32,
}

fn default_min_password_length() -> usize {
    6
}

fn default_argon2_memory_cost() -> u32 {
    65536 // 64 MB
}

fn default_argon2_time_cost() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_argon2_hash_length() -> u32 {
    32
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
            argon2: Argon2Config::default(),
        }
    }
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost: default_argon2_memory_cost(),
            time_cost: default_argon2_time_cost(),
            parallelism: default_argon2_parallelism(),
            hash_length: default_argon2_hash_length(),
        }
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_password_length == 0 {
            return Err(ConfigError::ValidationError(
                "auth.min_password_length must be > 0".to_string(),
            ));
        }
        self.argon2.validate()?;
        Ok(())
    }
}

impl Validate for Argon2Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_cost == 0 {
            return Err(ConfigError::ValidationError("auth.argon2.memory_cost must be > 0".to_string()));
        }
        if self.time_cost == 0 {
            return Err(ConfigError::ValidationError("auth.argon2.time_cost must be > 0".to_string()));
        }
        if self.parallelism == 0 {
            return Err(ConfigError::ValidationError("auth.argon2.parallelism must be > 0".to_string()));
        }
        if self.hash_length < 4 {
            return Err(ConfigError::ValidationError("auth.argon2.hash_length must be >= 4".to_string()));
        }
        Ok(())
    }
}
