mod common;

use axum::http::{Method, StatusCode};
use common::{delete, get, post, post_raw, send, test_app};
use serde_json::json;

fn ana() -> serde_json::Value {
    json!({ "username": "ana", "email": "a@x.com", "password": "secret1" })
}

#[tokio::test]
async fn test_register_then_list_finds_exactly_one() {
    let app = test_app();

    let (status, created) = post(&app, "/adduser", ana()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "User registered successfully");

    let (status, body) = get(&app, "/user").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "200");
    let matching: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|u| u["email"] == "a@x.com")
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0]["username"], "ana");
    assert_eq!(matching[0]["_id"], created["id"]);
}

#[tokio::test]
async fn test_user_list_never_contains_password_material() {
    let app = test_app();
    post(&app, "/adduser", ana()).await;

    let (_, body) = get(&app, "/user").await;
    let user = &body["data"][0];
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
    assert!(!body.to_string().contains("argon2"));
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = test_app();
    let (first, _) = post(&app, "/adduser", ana()).await;
    assert_eq!(first, StatusCode::CREATED);

    // Same address in a different case still collides.
    let (status, body) = post(
        &app,
        "/adduser",
        json!({ "username": "other", "email": "A@X.com", "password": "another1" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn test_concurrent_duplicate_registration_yields_one_success() {
    let app = test_app();

    let (a, b) = tokio::join!(post(&app, "/adduser", ana()), post(&app, "/adduser", ana()));
    let mut statuses = vec![a.0, b.0];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);

    let conflict = if a.0 == StatusCode::BAD_REQUEST { a.1 } else { b.1 };
    assert_eq!(conflict["message"], "User already exists");

    let (_, list) = get(&app, "/user").await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_validation_reports_each_field() {
    let app = test_app();

    let (status, body) = post(
        &app,
        "/adduser",
        json!({ "username": "", "email": "not-an-email", "password": "123" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");

    let messages: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Username is required",
            "Valid email is required",
            "Password must be at least 6 characters"
        ]
    );
}

#[tokio::test]
async fn test_register_with_missing_fields_is_validation_error() {
    let app = test_app();
    let (status, body) = post(&app, "/adduser", json!({ "email": "a@x.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = test_app();
    let (status, body) = post_raw(&app, "/adduser", "{ not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["errors"][0]["field"], "body");
}

#[tokio::test]
async fn test_login_success_returns_token_accepted_by_me() {
    let app = test_app();
    post(&app, "/adduser", ana()).await;

    let (status, body) = post(
        &app,
        "/login",
        json!({ "email": "a@x.com", "password": "secret1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 86400);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, me) = send(&app, Method::GET, "/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["role"], "user");
    assert_eq!(me["name"], "ana");
    assert_eq!(me["email"], "a@x.com");
}

#[tokio::test]
async fn test_login_does_not_reveal_which_part_was_wrong() {
    let app = test_app();
    post(&app, "/adduser", ana()).await;

    let wrong_password = post(
        &app,
        "/login",
        json!({ "email": "a@x.com", "password": "wrong" }),
    )
    .await;
    let unknown_email = post(
        &app,
        "/login",
        json!({ "email": "nobody@x.com", "password": "secret1" }),
    )
    .await;

    assert_eq!(wrong_password.0, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.1, json!({ "message": "Invalid email or password" }));
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = test_app();
    let (status, body) = post(&app, "/login", json!({ "email": "a@x.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email and password are required");

    let (status, _) = post_raw(&app, "/login", "garbage").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_user_lifecycle() {
    let app = test_app();
    let (_, created) = post(&app, "/adduser", ana()).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = delete(&app, &format!("/deleteuser/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");

    let (_, list) = get(&app, "/user").await;
    assert!(list["data"].as_array().unwrap().is_empty());

    let (status, body) = delete(&app, &format!("/deleteuser/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_delete_user_with_malformed_id_is_not_found() {
    let app = test_app();
    let (status, body) = delete(&app, "/deleteuser/65f0c1d2e3a4b5c6d7e8f901").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_token_of_deleted_user_is_rejected() {
    let app = test_app();
    let (_, created) = post(&app, "/adduser", ana()).await;
    let (_, login) = post(
        &app,
        "/login",
        json!({ "email": "a@x.com", "password": "secret1" }),
    )
    .await;
    let token = login["token"].as_str().unwrap().to_string();

    delete(&app, &format!("/deleteuser/{}", created["id"].as_str().unwrap())).await;

    let (status, body) = send(&app, Method::GET, "/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Account no longer exists");
}
