use actix_web::web::{Data, Json};
use actix_web::{HttpRequest, HttpResponse, Responder, post};
use sea_orm::DatabaseConnection;

use crate::config::auth::AuthConfig;
use crate::error::{Error, ErrorResponse};
use crate::metrics::AppMetrics;
use crate::middlewares::v1::auth::Auth;
use crate::requests::v1::user::{UserStoreRequest, UserUpdateRequest};
use crate::responses::v1::user::User;
use crate::security::PasswordHasher;
use crate::services;

/// Register a new user
///
/// Fail if
/// - email is missing, malformed or already registered
/// - password is missing or too short
#[utoipa::path(
    tag = "User",
    request_body = UserStoreRequest,
    responses(
        (status = 201, description = "Created", body = User),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
)]
#[post("/users/create")]
pub async fn store(
    db: Data<DatabaseConnection>,
    hasher: Data<PasswordHasher>,
    config: Data<AuthConfig>,
    metrics: Data<AppMetrics>,
    Json(request): Json<UserStoreRequest>,
) -> Result<impl Responder, Error> {
    let user = services::v1::user::store::store(&db, &hasher, &config, &metrics, request).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Get the authenticated user's profile
///
/// Fail if the token is missing or unknown
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "User",
    security(("token" = [])),
    responses(
        User,
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
)]
pub async fn me(auth: Auth) -> Result<impl Responder, Error> {
    let user = services::v1::user::me::me(auth).await?;
    Ok(Json(user))
}

/// Update the authenticated user's name and/or password
///
/// Fail if
/// - the token is missing or unknown
/// - the new password is too short
#[utoipa::path(
    patch,
    path = "/users/me",
    tag = "User",
    security(("token" = [])),
    request_body = UserUpdateRequest,
    responses(
        User,
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
)]
pub async fn update(
    auth: Auth,
    db: Data<DatabaseConnection>,
    hasher: Data<PasswordHasher>,
    config: Data<AuthConfig>,
    metrics: Data<AppMetrics>,
    Json(request): Json<UserUpdateRequest>,
) -> Result<impl Responder, Error> {
    let user =
        services::v1::user::update::update(&db, &hasher, &config, &metrics, auth, request).await?;
    Ok(Json(user))
}

/// Fallback for every verb `/users/me` does not support. Runs without the
/// token extractor, so the answer is 405 whether or not the caller is
/// authenticated.
pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, Error> {
    Err(Error::MethodNotAllowed {
        message: format!("Method \"{}\" not allowed.", req.method()),
    })
}
