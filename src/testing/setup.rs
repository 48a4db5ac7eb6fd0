use sea_orm::{DatabaseConnection, DbErr};
use user_api_migration::{Migrator, MigratorTrait};
use uuid::Uuid;

use crate::config::auth::{Argon2Config, AuthConfig};
use crate::database;
use crate::entities::v1::users;
use crate::helpers::now;
use crate::security::password::PasswordHasher;

/// Returns an in-memory SQLite database with all migrations applied
///
/// Every call opens a separate database, so tests never see each other's rows.
///
/// # Panics
/// Panics if the connection or a migration fails.
///
/// # Example
/// ```no_run
/// use user_api::testing::setup;
///
/// #[tokio::test]
/// async fn test_something() {
///     let db = setup::database().await;
/// }
/// ```
pub async fn database() -> DatabaseConnection {
    let db = database::memory()
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Auth settings with reduced Argon2 cost, keeping the default password rules
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        argon2: Argon2Config {
            memory_cost: 4096,
            time_cost: 1,
            parallelism: 1,
            hash_length: 32,
        },
        ..AuthConfig::default()
    }
}

/// Returns a PasswordHasher configured with fast parameters for testing
///
/// Production parameters would make every registration in a test take
/// hundreds of milliseconds.
pub fn password_hasher() -> Result<PasswordHasher, argon2::password_hash::Error> {
    PasswordHasher::from_config(&auth_config())
}

/// Inserts a user directly, bypassing the registration service
///
/// `email` is stored as given; callers pass it already lowercased.
pub async fn create_user(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    email: &str,
    password: &str,
    name: &str,
) -> Result<users::Model, DbErr> {
    let password = hasher
        .hash(password)
        .map_err(|e| DbErr::Custom(e.to_string()))?;
    let now = now();

    users::Model {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password,
        name: name.to_string(),
        created_at: now,
        updated_at: now,
    }
    .store(db)
    .await
}
