use std::time::Instant;

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use sea_orm::DatabaseConnection;

use crate::entities::v1::{tokens, users};
use crate::error::Error;

/// Authorization schemes accepted in front of the token key.
pub const SCHEMES: [&str; 2] = ["Token", "Bearer"];

/// Caller resolved from the `Authorization` header before the handler runs.
///
/// Extraction fails closed: anything but a known token yields 401. The user
/// record carries the password hash, so this type is never serialized.
#[derive(Clone)]
pub struct Auth {
    pub user: users::Model,
}

impl FromRequest for Auth {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let start = Instant::now();
        let db = req.app_data::<Data<DatabaseConnection>>().cloned();
        let key = credentials(req);

        Box::pin(async move {
            let key = key?;
            let db = match db {
                Some(db) => db,
                None => {
                    ::tracing::error!("Failed to get database connection");

                    return Err(Error::internal("Internal server error"));
                }
            };

            let user = match tokens::Model::user(&db, &key).await? {
                Some(user) => user,
                None => {
                    ::tracing::debug!("Token not found");

                    return Err(Error::unauthorized("Invalid token."));
                }
            };

            ::tracing::debug!(user_id = %user.id, "Authentication took: {:?}", start.elapsed());

            Ok(Auth { user })
        })
    }
}

/// Pulls the token key out of `Authorization: <scheme> <key>`.
fn credentials(req: &HttpRequest) -> Result<String, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Authentication credentials were not provided."))?;

    let header = header.to_str().map_err(|_| {
        Error::unauthorized(
            "Invalid token header. Token string should not contain invalid characters.",
        )
    })?;

    let mut parts = header.split_whitespace();

    match parts.next() {
        Some(scheme) if SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) => (),
        _ => {
            return Err(Error::unauthorized(
                "Authentication credentials were not provided.",
            ));
        }
    }

    let key = parts
        .next()
        .ok_or_else(|| Error::unauthorized("Invalid token header. No credentials provided."))?;

    if parts.next().is_some() {
        return Err(Error::unauthorized(
            "Invalid token header. Token string should not contain spaces.",
        ));
    }

    Ok(key.to_string())
}
