//! Integration tests for invitation-gated registration.

mod helpers;

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::{Value, json};

use portal_entity::staff::AccessLevel;

const CODE: &str = "abcd-efgh-ijkl-mnop";

fn form(email: &str, token: &str) -> Value {
    json!({
        "email": email,
        "password": "s3cret-pass",
        "firstname": "Sam",
        "surname": "Lee",
        "token": token,
    })
}

async fn app_with_invitation(expires_in: Duration) -> helpers::TestApp {
    let app = helpers::TestApp::new();
    let admin = app
        .create_staff("admin@school.test", "adminpass", AccessLevel::Admin)
        .await;
    let now = Utc::now();
    app.insert_invitation(CODE, admin, now, now + expires_in).await;
    app
}

#[tokio::test]
async fn test_register_consumes_token_once() {
    let app = app_with_invitation(Duration::days(3)).await;

    let first = app
        .request("POST", "/api/auth/register", Some(form("sam@school.test", CODE)), None)
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["message"], "Account created successfully");
    assert_eq!(first.body["staff"]["email"], "sam@school.test");
    assert_eq!(first.body["staff"]["accessLevel"], "staff");
    assert!(first.body["staff"].get("password_hash").is_none());

    let second = app
        .request("POST", "/api/auth/register", Some(form("kim@school.test", CODE)), None)
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["message"], "This token has already been used");

    let invitation = app
        .db
        .invitations()
        .find_by_code(CODE)
        .await
        .unwrap()
        .unwrap();
    assert!(invitation.used);
    assert_eq!(invitation.used_by.as_deref(), Some("sam@school.test"));
    assert!(invitation.used_at.is_some());

    app.login("sam@school.test", "s3cret-pass").await;
}

#[tokio::test]
async fn test_duplicate_email_leaves_token_available() {
    let app = app_with_invitation(Duration::days(1)).await;

    let taken = app
        .request("POST", "/api/auth/register", Some(form("ADMIN@school.test", CODE)), None)
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);
    assert_eq!(taken.body["message"], "Email already in use");

    let fresh = app
        .request("POST", "/api/auth/register", Some(form("new@school.test", CODE)), None)
        .await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_token_is_rejected_even_if_unused() {
    let app = helpers::TestApp::new();
    let admin = app
        .create_staff("admin@school.test", "adminpass", AccessLevel::Admin)
        .await;
    let issued = Utc::now() - Duration::days(4);
    app.insert_invitation(CODE, admin, issued, issued + Duration::days(3))
        .await;

    let response = app
        .request("POST", "/api/auth/register", Some(form("sam@school.test", CODE)), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "This token has expired");
}

#[tokio::test]
async fn test_register_input_checks() {
    let app = app_with_invitation(Duration::days(7)).await;

    let mut missing = form("sam@school.test", CODE);
    missing["surname"] = json!("");
    let response = app
        .request("POST", "/api/auth/register", Some(missing), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "All fields are required");

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(form("sam@school.test", "ABCD-EFGH-IJKL-MNOP")),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid token format");

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(form("sam@school.test", "zzzz-zzzz-zzzz-zzzz")),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid token");
}
