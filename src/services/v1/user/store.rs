use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::config::auth::AuthConfig;
use crate::entities::v1::users::Model;
use crate::error::{Error, Validation};
use crate::helpers::{is_unique_violation, now};
use crate::metrics::AppMetrics;
use crate::requests::v1::user::UserStoreRequest;
use crate::responses::v1::user::User;
use crate::security::validation::MAX_NAME_LENGTH;
use crate::security::{PasswordHasher, Validator};

pub const EMAIL_TAKEN: &str = "User with this email already exists.";

#[::tracing::instrument(skip(db, hasher, config, metrics, request), fields(email = %request.email))]
pub async fn store(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    config: &AuthConfig,
    metrics: &AppMetrics,
    request: UserStoreRequest,
) -> Result<User, Error> {
    let mut validation = Validation::new();
    let email = Validator::normalize_email(&request.email);
    let password = request.password;
    let name = request.name.unwrap_or_default().trim().to_string();

    if email.is_empty() {
        validation.add("email", "This field is required.");
    } else if !Validator::validate_email(&email) {
        validation.add("email", "Enter a valid email address.");
    } else if Model::email_exists(db, &email).await? {
        validation.add("email", EMAIL_TAKEN);
    }

    if password.is_empty() {
        validation.add("password", "This field is required.");
    } else if let Err(errors) = Validator::validate_password(&password, config.min_password_length) {
        for error in errors {
            validation.add("password", error);
        }
    }

    if !Validator::validate_length(&name, 0, MAX_NAME_LENGTH) {
        validation.add(
            "name",
            format!("Ensure this field has no more than {} characters.", MAX_NAME_LENGTH),
        );
    }

    if !validation.is_empty() {
        ::tracing::debug!("Registration rejected by validation");
        return Err(validation.into());
    }

    let id = Uuid::new_v4();

    ::tracing::debug!(user_id = %id, "Hashing password with Argon2id");
    let password = hasher.hash(&password)?;

    let model = Model {
        id,
        email,
        password,
        name,
        created_at: now(),
        updated_at: now(),
    };

    let user = match model.store(db).await {
        Ok(user) => user,
        // lost a race against a concurrent registration of the same email
        Err(e) if is_unique_violation(&e) => {
            validation.add("email", EMAIL_TAKEN);
            return Err(validation.into());
        }
        Err(e) => return Err(e.into()),
    };

    metrics.record_registration();
    ::tracing::info!(user_id = %user.id, "User created successfully");

    Ok(user.into())
}
