use sea_orm::DatabaseConnection;

use crate::entities::v1::users;

/// Token key for `user`, minted on first call.
pub async fn token(db: &DatabaseConnection, user: &users::Model) -> String {
    let (token, _) = user.token(db).await.expect("Failed to get or create token");

    token.key
}

/// Builds the full application against a fresh in-memory database.
///
/// Evaluates to `(service, db)`.
#[macro_export]
macro_rules! service {
    () => {{
        let db = $crate::testing::setup::database().await;
        let hasher = $crate::testing::setup::password_hasher()
            .expect("Failed to build password hasher");
        let app = ::actix_web::App::new()
            .app_data(::actix_web::web::Data::new(db.clone()))
            .app_data(::actix_web::web::Data::new(hasher))
            .app_data(::actix_web::web::Data::new(
                $crate::testing::setup::auth_config(),
            ))
            .configure($crate::router::route);

        let service = ::actix_web::test::init_service(app).await;

        (service, db)
    }};
}
