use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::{Context, anyhow};
use user_api::security::PasswordHasher;
use user_api::{config, database, logging, router};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load().context("Failed to load configuration")?;

    logging::init(&config.observability);

    ::tracing::info!(
        name = %config.app.name,
        environment = %config.app.environment,
        "Starting application"
    );

    let db = database::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    let hasher = PasswordHasher::from_config(&config.auth)
        .map_err(|e| anyhow!("Invalid Argon2 parameters: {}", e))?;

    let address = config.server.address();
    ::tracing::info!(host = %address.0, port = address.1, "Listening");

    let server_config = config.clone();
    HttpServer::new(move || {
        let config = &server_config;

        App::new()
            .wrap(Logger::default())
            .wrap(router::cors(&config.security.cors))
            .app_data(Data::new(db.clone()))
            .app_data(Data::new(hasher.clone()))
            .app_data(Data::new(config.auth.clone()))
            .configure(router::route)
            .configure(|app| router::docs(app, &config.api))
    })
    .workers(config.server.workers)
    .bind(address)?
    .run()
    .await?;

    Ok(())
}
