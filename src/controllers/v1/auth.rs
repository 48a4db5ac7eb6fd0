use actix_web::{Responder, post};
use actix_web::web::{Data, Json};
use sea_orm::DatabaseConnection;

use crate::error::{Error, ErrorResponse};
use crate::metrics::AppMetrics;
use crate::requests::v1::auth::TokenRequest;
use crate::responses::v1::auth::Token;
use crate::security::PasswordHasher;
use crate::services;

/// Obtain the token for a user
///
/// The same token is returned on every successful call.
///
/// Fail if:
/// - email or password is missing
/// - email not found
/// - password is incorrect
#[utoipa::path(
    tag = "Auth",
    request_body = TokenRequest,
    responses(
        Token,
        (status = 400, description = "Unable to authenticate", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/users/token")]
pub async fn token(
    db: Data<DatabaseConnection>,
    hasher: Data<PasswordHasher>,
    metrics: Data<AppMetrics>,
    Json(request): Json<TokenRequest>,
) -> Result<impl Responder, Error> {
    let response = services::v1::auth::token::token(&db, &hasher, &metrics, request).await?;
    Ok(Json(response))
}
