//! Integration tests for /users/me

use actix_web::http::{Method, StatusCode};
use actix_web::test::{call_service, read_body_json, TestRequest};
use sea_orm::EntityTrait;
use serde_json::{json, Value};
use user_api::entities::v1::users;
use user_api::testing::{instance, setup};

#[actix_web::test]
async fn test_me_returns_profile_without_password() {
    let (service, db) = user_api::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_user(&db, &hasher, "rest@api.com", "testpass", "Test name")
        .await
        .unwrap();
    let token = instance::token(&db, &user).await;

    let req = TestRequest::get()
        .uri("/users/me")
        .insert_header(("Authorization", format!("Token {}", token)))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body, json!({"name": "Test name", "email": "rest@api.com"}));
}

#[actix_web::test]
async fn test_me_accepts_bearer_scheme() {
    let (service, db) = user_api::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_user(&db, &hasher, "rest@api.com", "testpass", "")
        .await
        .unwrap();
    let token = instance::token(&db, &user).await;

    let req = TestRequest::get()
        .uri("/users/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_me_without_token_is_unauthorized() {
    let (service, _db) = user_api::service!();

    let req = TestRequest::get().uri("/users/me").to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get("WWW-Authenticate").unwrap(), "Token");

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["message"], "Authentication credentials were not provided.");
}

#[actix_web::test]
async fn test_me_with_unknown_token_is_unauthorized() {
    let (service, _db) = user_api::service!();

    let req = TestRequest::get()
        .uri("/users/me")
        .insert_header(("Authorization", format!("Token {}", "0".repeat(40))))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid token.");
}

/// Unsupported verbs answer 405 with or without a valid token
#[actix_web::test]
async fn test_me_unsupported_methods_not_allowed() {
    let (service, db) = user_api::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_user(&db, &hasher, "rest@api.com", "testpass", "")
        .await
        .unwrap();
    let token = instance::token(&db, &user).await;

    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let req = TestRequest::default()
            .method(method.clone())
            .uri("/users/me")
            .to_request();
        let resp = call_service(&service, req).await;
        assert_eq!(
            resp.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "{} without token",
            method
        );

        let req = TestRequest::default()
            .method(method.clone())
            .uri("/users/me")
            .insert_header(("Authorization", format!("Token {}", token)))
            .to_request();
        let resp = call_service(&service, req).await;
        assert_eq!(
            resp.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "{} with token",
            method
        );
    }
}

#[actix_web::test]
async fn test_patch_name_only_keeps_password() {
    let (service, db) = user_api::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_user(&db, &hasher, "rest@api.com", "testpass", "Test name")
        .await
        .unwrap();
    let token = instance::token(&db, &user).await;

    let req = TestRequest::patch()
        .uri("/users/me")
        .insert_header(("Authorization", format!("Token {}", token)))
        .set_json(json!({"name": "  New name  "}))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body, json!({"name": "New name", "email": "rest@api.com"}));

    let stored = users::Entity::find_by_id(user.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.password, user.password);
}

#[actix_web::test]
async fn test_patch_short_password_rejected() {
    let (service, db) = user_api::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_user(&db, &hasher, "rest@api.com", "testpass", "")
        .await
        .unwrap();
    let token = instance::token(&db, &user).await;

    let req = TestRequest::patch()
        .uri("/users/me")
        .insert_header(("Authorization", format!("Token {}", token)))
        .set_json(json!({"password": "123"}))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_body_json(resp).await;
    assert!(body["errors"].get("password").is_some());

    let stored = users::Entity::find_by_id(user.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert!(hasher.verify("testpass", &stored.password).unwrap());
}

#[actix_web::test]
async fn test_patch_empty_body_is_a_no_op() {
    let (service, db) = user_api::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_user(&db, &hasher, "rest@api.com", "testpass", "Test name")
        .await
        .unwrap();
    let token = instance::token(&db, &user).await;

    let req = TestRequest::patch()
        .uri("/users/me")
        .insert_header(("Authorization", format!("Token {}", token)))
        .set_json(json!({}))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body, json!({"name": "Test name", "email": "rest@api.com"}));

    let stored = users::Entity::find_by_id(user.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, user.name);
    assert_eq!(stored.password, user.password);
}

#[actix_web::test]
async fn test_patch_without_token_is_unauthorized() {
    let (service, _db) = user_api::service!();

    let req = TestRequest::patch()
        .uri("/users/me")
        .set_json(json!({"name": "New name"}))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
