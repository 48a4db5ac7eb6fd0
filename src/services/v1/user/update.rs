use sea_orm::DatabaseConnection;

use crate::config::auth::AuthConfig;
use crate::error::{Error, Validation};
use crate::metrics::AppMetrics;
use crate::middlewares::v1::auth::Auth;
use crate::requests::v1::user::UserUpdateRequest;
use crate::responses::v1::user::User;
use crate::security::validation::MAX_NAME_LENGTH;
use crate::security::{PasswordHasher, Validator};

/// Applies a partial update to the caller's own record.
#[::tracing::instrument(skip(db, hasher, config, metrics, auth, request), fields(user_id = %auth.user.id))]
pub async fn update(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    config: &AuthConfig,
    metrics: &AppMetrics,
    auth: Auth,
    request: UserUpdateRequest,
) -> Result<User, Error> {
    let mut validation = Validation::new();
    let name = request.name.map(|name| name.trim().to_string());

    if let Some(name) = &name {
        if !Validator::validate_length(name, 0, MAX_NAME_LENGTH) {
            validation.add(
                "name",
                format!("Ensure this field has no more than {} characters.", MAX_NAME_LENGTH),
            );
        }
    }

    if let Some(password) = &request.password {
        if let Err(errors) = Validator::validate_password(password, config.min_password_length) {
            for error in errors {
                validation.add("password", error);
            }
        }
    }

    if !validation.is_empty() {
        return Err(validation.into());
    }

    if name.is_none() && request.password.is_none() {
        ::tracing::debug!("Nothing to update");
        return Ok(auth.user.into());
    }

    let password = request
        .password
        .as_deref()
        .map(|password| hasher.hash(password))
        .transpose()?;

    let user = auth.user.update_profile(db, name, password).await?;

    metrics.record_profile_update();
    ::tracing::info!("User profile updated successfully");

    Ok(user.into())
}
