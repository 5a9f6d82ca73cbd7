//! Integration tests for login, verify, refresh, and logout.

mod helpers;

use chrono::{Duration, Utc};
use http::StatusCode;

use portal_auth::jwt::{JwtDecoder, JwtEncoder, SessionIdentity};
use portal_core::types::StaffId;
use portal_entity::staff::AccessLevel;

fn identity(id: StaffId) -> SessionIdentity {
    SessionIdentity {
        user_id: id,
        email: "jo@school.test".to_string(),
        access_level: AccessLevel::Staff,
        firstname: "Test".to_string(),
        surname: "jo".to_string(),
    }
}

#[tokio::test]
async fn test_login_success_sets_cookie() {
    let app = helpers::TestApp::new();
    app.create_staff("jo@school.test", "password123", AccessLevel::Staff)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "jo@school.test",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["staff"]["email"], "jo@school.test");
    assert_eq!(response.body["staff"]["accessLevel"], "staff");
    assert!(response.body["staff"].get("password_hash").is_none());
    assert!(response.body["staff"]["last_login"].is_string());
    assert_eq!(response.body["subjects"], serde_json::json!([]));
    assert!(response.body["token"].is_string());

    let cookie = response.set_cookie.expect("login sets the session cookie");
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=86400"));
}

#[tokio::test]
async fn test_login_rejections_do_not_reveal_accounts() {
    let app = helpers::TestApp::new();
    app.create_staff("jo@school.test", "password123", AccessLevel::Staff)
        .await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "jo@school.test", "password": "nope" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "nobody@school.test", "password": "nope" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["message"], "Invalid email or password");
    assert_eq!(wrong_password.body, unknown.body);
    assert!(wrong_password.set_cookie.is_none());
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "jo@school.test" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = helpers::TestApp::new();

    let req = http::Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_verify_reads_cookie_then_bearer() {
    let app = helpers::TestApp::new();
    let id = app
        .create_staff("jo@school.test", "password123", AccessLevel::Staff)
        .await;
    let token = app.login("jo@school.test", "password123").await;

    let via_cookie = app
        .request_with_cookie("GET", "/api/auth/verify", None, &token)
        .await;
    assert_eq!(via_cookie.status, StatusCode::OK);
    assert_eq!(via_cookie.body["user"]["userId"], id.get());
    assert_eq!(via_cookie.body["user"]["email"], "jo@school.test");
    assert_eq!(via_cookie.body["user"]["accessLevel"], "staff");

    let via_bearer = app
        .request("GET", "/api/auth/verify", None, Some(&token))
        .await;
    assert_eq!(via_bearer.status, StatusCode::OK);
    assert_eq!(via_bearer.body["user"], via_cookie.body["user"]);
}

#[tokio::test]
async fn test_verify_rejection_reasons() {
    let app = helpers::TestApp::new();

    let missing = app.request("GET", "/api/auth/verify", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "UNAUTHENTICATED");
    assert_eq!(missing.body["message"], "No authentication token");

    let garbage = app
        .request("GET", "/api/auth/verify", None, Some("not.a.token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body["error"], "INVALID_TOKEN");
    assert_eq!(garbage.body["message"], "Invalid or malformed token");

    let stale = JwtEncoder::new(&app.config)
        .issue_at(&identity(StaffId(1)), Utc::now() - Duration::days(2))
        .unwrap();
    let expired = app
        .request("GET", "/api/auth/verify", None, Some(&stale.token))
        .await;
    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
    assert_eq!(expired.body["message"], "Token expired, please login again");

    let mut foreign_config = app.config.clone();
    foreign_config.auth.token_marker = "some-other-app".to_string();
    let foreign = JwtEncoder::new(&foreign_config)
        .issue(&identity(StaffId(1)))
        .unwrap();
    let wrong_marker = app
        .request("GET", "/api/auth/verify", None, Some(&foreign.token))
        .await;
    assert_eq!(wrong_marker.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_marker.body["message"], "Invalid token format");
}

#[tokio::test]
async fn test_refresh_reissues_and_resets_cookie() {
    let app = helpers::TestApp::new();
    app.create_staff("jo@school.test", "password123", AccessLevel::Staff)
        .await;
    let token = app.login("jo@school.test", "password123").await;

    let response = app
        .request_with_cookie("POST", "/api/auth/refresh", None, &token)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let refreshed = response.body["token"].as_str().unwrap().to_string();
    let cookie = response.set_cookie.expect("refresh resets the cookie");
    assert!(cookie.starts_with(&format!("auth_token={refreshed}")));

    let verify = app
        .request("GET", "/api/auth/verify", None, Some(&refreshed))
        .await;
    assert_eq!(verify.status, StatusCode::OK);
    assert_eq!(verify.body["user"]["email"], "jo@school.test");
}

#[tokio::test]
async fn test_immediate_refresh_moves_expiry_forward() {
    let app = helpers::TestApp::new();
    app.create_staff("jo@school.test", "password123", AccessLevel::Staff)
        .await;
    let token = app.login("jo@school.test", "password123").await;

    let response = app
        .request("POST", "/api/auth/refresh", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let refreshed = response.body["token"].as_str().unwrap().to_string();
    assert_ne!(refreshed, token);

    let decoder = JwtDecoder::new(&app.config);
    let before = decoder.verify(&token).unwrap();
    let after = decoder.verify(&refreshed).unwrap();
    assert_eq!(after.identity, before.identity);
    assert!(after.issued_at() > before.issued_at());
    assert!(after.expires_at() > before.expires_at());
}

#[tokio::test]
async fn test_refresh_fails_closed() {
    let app = helpers::TestApp::new();

    let missing = app.request("POST", "/api/auth/refresh", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert!(missing.set_cookie.is_none());

    let stale = JwtEncoder::new(&app.config)
        .issue_at(&identity(StaffId(1)), Utc::now() - Duration::days(2))
        .unwrap();
    let expired = app
        .request("POST", "/api/auth/refresh", None, Some(&stale.token))
        .await;
    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
    assert!(expired.set_cookie.is_none());
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = helpers::TestApp::new();

    let response = app.request("POST", "/api/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logged out successfully");
    let cookie = response.set_cookie.expect("logout overwrites the cookie");
    assert!(cookie.starts_with("auth_token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_health_needs_no_session() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
