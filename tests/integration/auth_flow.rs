//! End-to-end flow: register, obtain a token, read and update the profile.

use actix_web::http::StatusCode;
use actix_web::test::{call_service, read_body_json, TestRequest};
use sea_orm::EntityTrait;
use serde_json::{json, Value};
use user_api::entities::v1::users;
use user_api::requests::v1::auth::TokenRequest;
use user_api::requests::v1::user::{UserStoreRequest, UserUpdateRequest};
use user_api::responses::v1::auth::Token;
use user_api::responses::v1::user::User;
use user_api::testing::setup;

/// Register, log in, then read the profile with the issued token
#[actix_web::test]
async fn test_complete_flow_success() {
    let (service, _db) = user_api::service!();

    // Step 1: register
    let req = TestRequest::post()
        .uri("/users/create")
        .set_json(&UserStoreRequest {
            email: "rest@api.com".to_string(),
            password: "testpass".to_string(),
            name: Some("Test name".to_string()),
        })
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "Registration should succeed");

    let body: User = read_body_json(resp).await;
    assert_eq!(
        body,
        User {
            name: "Test name".to_string(),
            email: "rest@api.com".to_string(),
        }
    );

    // Step 2: obtain a token
    let req = TestRequest::post()
        .uri("/users/token")
        .set_json(&TokenRequest {
            email: "rest@api.com".to_string(),
            password: "testpass".to_string(),
        })
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "Login should succeed");

    let Token { token } = read_body_json(resp).await;
    assert_eq!(token.len(), 40);

    // Step 3: read the profile
    let req = TestRequest::get()
        .uri("/users/me")
        .insert_header(("Authorization", format!("Token {}", token)))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body, json!({"name": "Test name", "email": "rest@api.com"}));
}

/// A PATCH of name and password persists both; the old password stops
/// working and the new one yields the same token
#[actix_web::test]
async fn test_password_change_flow() {
    let (service, db) = user_api::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_user(&db, &hasher, "rest@api.com", "testpass", "Test name")
        .await
        .unwrap();
    let token = user_api::testing::instance::token(&db, &user).await;

    let req = TestRequest::patch()
        .uri("/users/me")
        .insert_header(("Authorization", format!("Token {}", token)))
        .set_json(&UserUpdateRequest {
            name: Some("New name".to_string()),
            password: Some("newpassword".to_string()),
        })
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: User = read_body_json(resp).await;
    assert_eq!(body.name, "New name");

    let stored = users::Entity::find_by_id(user.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "New name");
    assert!(hasher.verify("newpassword", &stored.password).unwrap());
    assert!(!hasher.verify("testpass", &stored.password).unwrap());
    assert!(stored.updated_at >= user.updated_at);

    let req = TestRequest::post()
        .uri("/users/token")
        .set_json(&TokenRequest {
            email: "rest@api.com".to_string(),
            password: "testpass".to_string(),
        })
        .to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "Old password must be rejected");

    let req = TestRequest::post()
        .uri("/users/token")
        .set_json(&TokenRequest {
            email: "rest@api.com".to_string(),
            password: "newpassword".to_string(),
        })
        .to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Token = read_body_json(resp).await;
    assert_eq!(body.token, token, "The token survives a password change");
}
