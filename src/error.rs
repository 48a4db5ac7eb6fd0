//! Error taxonomy shared by every endpoint.
//!
//! Services return [`Error`]; actix turns it into the JSON envelope
//! `{"message": ..., "errors": {field: [messages]}}` through [`ResponseError`].

use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::http::header::WWW_AUTHENTICATE;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Field-level error bag, ordered by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Validation {
    errors: BTreeMap<String, Vec<String>>,
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F: ToString, M: ToString>(&mut self, field: F, message: M) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or conflicting input data.
    #[error("The given data was invalid.")]
    Validation(Validation),
    /// Credentials that do not identify a user, or that are missing.
    #[error("Unable to authenticate with provided credentials.")]
    Authentication(Validation),
    #[error("{message}")]
    BadRequest { message: String },
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    MethodNotAllowed { message: String },
    #[error("{message}")]
    InternalServerError { message: String },
}

impl Error {
    pub fn unauthorized<M: ToString>(message: M) -> Self {
        Self::Unauthorized {
            message: message.to_string(),
        }
    }

    pub fn internal<M: ToString>(message: M) -> Self {
        Self::InternalServerError {
            message: message.to_string(),
        }
    }

    pub fn validation(&self) -> Option<&Validation> {
        match self {
            Self::Validation(validation) | Self::Authentication(validation) => Some(validation),
            _ => None,
        }
    }
}

impl From<Validation> for Error {
    fn from(validation: Validation) -> Self {
        Self::Validation(validation)
    }
}

impl From<sea_orm::DbErr> for Error {
    fn from(e: sea_orm::DbErr) -> Self {
        ::tracing::error!(error = %e, "Database error");

        Self::internal("Internal server error")
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(e: argon2::password_hash::Error) -> Self {
        ::tracing::error!(error = %e, "Password hashing error");

        Self::internal("Internal server error")
    }
}

/// Wire shape of every error response.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "The given data was invalid.")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Validation::is_empty")]
    #[schema(value_type = Object)]
    pub errors: Validation,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Authentication(_) | Self::BadRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = ErrorResponse {
            message: self.to_string(),
            errors: self.validation().cloned().unwrap_or_default(),
        };

        let mut response = HttpResponse::build(self.status_code());

        if let Self::Unauthorized { .. } = self {
            response.insert_header((WWW_AUTHENTICATE, "Token"));
        }

        response.json(body)
    }
}
