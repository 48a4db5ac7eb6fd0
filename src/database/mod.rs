//! Database connection helpers.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use user_api_migration::{Migrator, MigratorTrait};

use crate::config::DatabaseConfig;

/// Open a pooled connection from configuration, applying pending migrations
/// when `run_migrations` is set.
#[::tracing::instrument(skip(config))]
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());

    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;

    if config.run_migrations {
        ::tracing::info!("Applying pending migrations");
        Migrator::up(&db, None).await?;
    }

    ::tracing::info!("Database connected");

    Ok(db)
}

/// Fresh in-memory SQLite database. A single pooled connection keeps the
/// schema alive for the lifetime of the returned handle.
pub async fn memory() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");

    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    Database::connect(options).await
}
