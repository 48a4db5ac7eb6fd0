use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;

use crate::config::auth::AuthConfig;

/// Argon2id password hasher
///
/// Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`)
/// carrying their own salt and parameters, so verification keeps working
/// after the configured parameters change.
///
/// ```no_run
/// use user_api::config::auth::AuthConfig;
/// use user_api::security::PasswordHasher;
///
/// let hasher = PasswordHasher::from_config(&AuthConfig::default()).unwrap();
/// let hash = hasher.hash("testpass").unwrap();
///
/// assert!(hasher.verify("testpass", &hash).unwrap());
/// ```
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create PasswordHasher from AuthConfig
    ///
    /// # Errors
    /// Returns error if Argon2 parameters are invalid (e.g., memory cost too low
    /// for the requested parallelism)
    #[tracing::instrument(skip(config))]
    pub fn from_config(config: &AuthConfig) -> Result<Self, argon2::password_hash::Error> {
        let params = Params::new(
            config.argon2.memory_cost,
            config.argon2.time_cost,
            config.argon2.parallelism,
            Some(config.argon2.hash_length as usize),
        )?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Ok(Self { argon2 })
    }

    /// Hash a password with a fresh random salt
    #[tracing::instrument(skip(self, password))]
    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash
    ///
    /// * `Ok(true)` - password matches
    /// * `Ok(false)` - password does not match
    /// * `Err(_)` - the stored hash is not a valid PHC string
    #[tracing::instrument(skip(self, password, hash))]
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;
        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
