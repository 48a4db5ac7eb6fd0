use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::{controllers, error, requests, responses};

/// Registers the `token` scheme referenced by the authenticated paths.
pub struct TokenAuthentication;

impl Modify for TokenAuthentication {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Token issued by POST /users/token, sent as `Token <key>`.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "User API"),
    tags(
        (name = "Auth"),
        (name = "User"),
        (name = "Health"),
    ),
    modifiers(&TokenAuthentication),
    paths(
        controllers::v1::user::store,
        controllers::v1::user::me,
        controllers::v1::user::update,

        controllers::v1::auth::token,

        controllers::health::health,
        controllers::health::health_db,
    ),
    components(schemas(
        requests::v1::auth::TokenRequest,
        requests::v1::user::UserStoreRequest,
        requests::v1::user::UserUpdateRequest,

        responses::v1::auth::Token,
        responses::v1::user::User,

        error::ErrorResponse,

        controllers::health::LivenessResponse,
        controllers::health::HealthResponse,
    )),
)]
pub struct Definition;
