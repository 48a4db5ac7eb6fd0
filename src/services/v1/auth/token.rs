use sea_orm::DatabaseConnection;

use crate::entities::v1::users::Model;
use crate::error::{Error, Validation};
use crate::metrics::AppMetrics;
use crate::requests::v1::auth::TokenRequest;
use crate::responses::v1::auth::Token;
use crate::security::{PasswordHasher, Validator};

pub const INVALID_CREDENTIALS: &str = "Unable to authenticate with provided credentials.";

/// Exchange email and password for the user's token.
///
/// Unknown email and wrong password fail identically.
#[::tracing::instrument(skip(db, hasher, metrics, request))]
pub async fn token(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    metrics: &AppMetrics,
    request: TokenRequest,
) -> Result<Token, Error> {
    let mut validation = Validation::new();
    let email = Validator::normalize_email(&request.email);
    let password = request.password;

    if email.is_empty() {
        validation.add("email", "This field is required.");
    }

    if password.is_empty() {
        validation.add("password", "This field is required.");
    }

    if !validation.is_empty() {
        metrics.record_auth_failure("missing_fields");
        return Err(Error::Authentication(validation));
    }

    let user = Model::find_by_email(db, &email).await?;
    let verified = match &user {
        Some(user) => hasher.verify(&password, &user.password)?,
        None => false,
    };

    let user = match user {
        Some(user) if verified => user,
        _ => {
            ::tracing::info!("Rejected token request with invalid credentials");
            metrics.record_auth_failure("invalid_credentials");
            validation.add("credentials", INVALID_CREDENTIALS);

            return Err(Error::Authentication(validation));
        }
    };

    let (token, created) = user.token(db).await?;

    metrics.record_token_issued(created);
    ::tracing::info!(user_id = %user.id, created, "Token issued");

    Ok(Token { token: token.key })
}
