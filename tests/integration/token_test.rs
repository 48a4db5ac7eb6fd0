//! Integration tests for POST /users/token

use actix_web::http::StatusCode;
use actix_web::test::{call_service, read_body_json, TestRequest};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use user_api::entities::v1::tokens;
use user_api::requests::v1::auth::TokenRequest;
use user_api::testing::setup;

fn credentials(email: &str, password: &str) -> TokenRequest {
    TokenRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[actix_web::test]
async fn test_token_valid_credentials() {
    let (service, db) = user_api::service!();
    let hasher = setup::password_hasher().unwrap();
    setup::create_user(&db, &hasher, "rest@api.com", "testpass", "")
        .await
        .unwrap();

    let req = TestRequest::post()
        .uri("/users/token")
        .set_json(credentials("rest@api.com", "testpass"))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    let token = body["token"].as_str().unwrap();
    assert_eq!(token.len(), 40);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

/// Login is case-insensitive on the email, like registration
#[actix_web::test]
async fn test_token_email_is_normalized() {
    let (service, db) = user_api::service!();
    let hasher = setup::password_hasher().unwrap();
    setup::create_user(&db, &hasher, "rest@api.com", "testpass", "")
        .await
        .unwrap();

    let req = TestRequest::post()
        .uri("/users/token")
        .set_json(credentials(" REST@api.com ", "testpass"))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_token_repeated_logins_return_same_token() {
    let (service, db) = user_api::service!();
    let hasher = setup::password_hasher().unwrap();
    setup::create_user(&db, &hasher, "rest@api.com", "testpass", "")
        .await
        .unwrap();

    let mut issued = Vec::new();
    for _ in 0..3 {
        let req = TestRequest::post()
            .uri("/users/token")
            .set_json(credentials("rest@api.com", "testpass"))
            .to_request();

        let resp = call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = read_body_json(resp).await;
        issued.push(body["token"].as_str().unwrap().to_string());
    }

    assert!(issued.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(tokens::Entity::find().count(&db).await.unwrap(), 1);
}

/// Wrong password and unknown email are indistinguishable
#[actix_web::test]
async fn test_token_invalid_credentials() {
    let (service, db) = user_api::service!();
    let hasher = setup::password_hasher().unwrap();
    setup::create_user(&db, &hasher, "rest@api.com", "testpass", "")
        .await
        .unwrap();

    let mut bodies = Vec::new();
    for request in [
        credentials("rest@api.com", "wrongpass"),
        credentials("nobody@api.com", "testpass"),
    ] {
        let req = TestRequest::post()
            .uri("/users/token")
            .set_json(request)
            .to_request();

        let resp = call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = read_body_json(resp).await;
        assert!(body.get("token").is_none());
        assert_eq!(
            body["errors"]["credentials"],
            json!(["Unable to authenticate with provided credentials."])
        );
        bodies.push(body);
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(tokens::Entity::find().count(&db).await.unwrap(), 0);
}

#[actix_web::test]
async fn test_token_missing_fields() {
    let (service, _db) = user_api::service!();

    let req = TestRequest::post()
        .uri("/users/token")
        .set_json(json!({}))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_body_json(resp).await;
    assert!(body.get("token").is_none());
    assert_eq!(body["errors"]["email"], json!(["This field is required."]));
    assert_eq!(body["errors"]["password"], json!(["This field is required."]));
}

#[actix_web::test]
async fn test_token_missing_password_only() {
    let (service, db) = user_api::service!();
    let hasher = setup::password_hasher().unwrap();
    setup::create_user(&db, &hasher, "rest@api.com", "testpass", "")
        .await
        .unwrap();

    let req = TestRequest::post()
        .uri("/users/token")
        .set_json(json!({"email": "rest@api.com"}))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_body_json(resp).await;
    assert!(body.get("token").is_none());
    assert!(body["errors"].get("email").is_none());
    assert_eq!(body["errors"]["password"], json!(["This field is required."]));
}

/// SQL in the email is matched literally and never authenticates
#[actix_web::test]
async fn test_token_sql_injection_in_email() {
    let (service, db) = user_api::service!();
    let hasher = setup::password_hasher().unwrap();
    setup::create_user(&db, &hasher, "rest@api.com", "testpass", "")
        .await
        .unwrap();

    let req = TestRequest::post()
        .uri("/users/token")
        .set_json(credentials("' OR '1'='1", "' OR '1'='1"))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_body_json(resp).await;
    assert!(body.get("token").is_none());
}
