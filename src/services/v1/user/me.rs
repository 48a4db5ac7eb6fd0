use crate::error::Error;
use crate::middlewares::v1::auth::Auth;
use crate::responses::v1::user::User;

#[::tracing::instrument(skip(auth), fields(user_id = %auth.user.id))]
pub async fn me(auth: Auth) -> Result<User, Error> {
    ::tracing::debug!("Returning authenticated user profile");
    Ok(auth.user.into())
}
