use actix_cors::Cors;
use actix_web::error::JsonPayloadError;
use actix_web::web::{self, Data, JsonConfig, ServiceConfig};
use actix_web::HttpRequest;
use utoipa::OpenApi;
use utoipa_swagger_ui::{SwaggerUi, Url};

use crate::api::Definition;
use crate::config::{ApiConfig, CorsConfig};
use crate::controllers;
use crate::error::Error;
use crate::metrics::AppMetrics;

pub fn route(app: &mut ServiceConfig) {
    app.app_data(Data::new(AppMetrics::new()));
    app.app_data(JsonConfig::default().error_handler(json_error));
    // User
    app.service(controllers::v1::user::store);
    app.service(
        web::resource("/users/me")
            .route(web::get().to(controllers::v1::user::me))
            .route(web::patch().to(controllers::v1::user::update))
            .default_service(web::to(controllers::v1::user::method_not_allowed)),
    );
    // Auth
    app.service(controllers::v1::auth::token);

    // Health check endpoints
    app.service(controllers::health::health);
    app.service(controllers::health::health_db);

    // Metrics endpoint
    app.service(controllers::metrics::metrics);
}

/// Swagger UI and the raw document at `/api.json`. Must be registered last.
pub fn docs(app: &mut ServiceConfig, config: &ApiConfig) {
    if !config.swagger_enabled {
        return;
    }

    let path = config.swagger_path.trim_end_matches('/');

    app.service(web::redirect(path.to_string(), format!("{}/", path)));
    app.service(SwaggerUi::new(format!("{}/{{_:.*}}", path)).urls(vec![(
        Url::new("User API", "/api.json"),
        Definition::openapi(),
    )]));
}

/// A disabled config still wraps the app, but admits no cross-origin caller.
pub fn cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        return Cors::default();
    }

    let cors = if config.allows_any_origin() {
        Cors::default().allow_any_origin()
    } else {
        config
            .origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(config.methods.iter().map(String::as_str))
        .allowed_headers(config.headers.iter().map(String::as_str))
        .max_age(config.max_age)
}

fn json_error(err: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    ::tracing::debug!(error = %err, "Rejected request body");

    Error::BadRequest {
        message: "Malformed request body.".to_string(),
    }
    .into()
}
