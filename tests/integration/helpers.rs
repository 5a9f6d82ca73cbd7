//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use chrono::{DateTime, Utc};
use http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use portal_api::{AppState, build_app};
use portal_auth::password::PasswordHasher;
use portal_core::config::{AppConfig, DatabaseProvider};
use portal_core::types::StaffId;
use portal_database::{Database, MemoryDatabase};
use portal_entity::invitation::{InvitationCode, NewInvitation};
use portal_entity::staff::{AccessLevel, NewStaff};

/// Secret shared by every test app.
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store handle for direct setup and assertions
    pub db: Database,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application backed by a fresh in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = TEST_SECRET.to_string();
        config.database.provider = DatabaseProvider::Memory;
        config.validate().expect("test config must be valid");

        let db = Database::memory(MemoryDatabase::new());
        let router = build_app(AppState::new(config.clone(), db.clone()));

        Self { router, db, config }
    }

    /// Insert a staff account directly and return its id
    pub async fn create_staff(
        &self,
        email: &str,
        password: &str,
        access_level: AccessLevel,
    ) -> StaffId {
        let password_hash = PasswordHasher::new()
            .hash_password(password)
            .expect("Failed to hash password");

        self.db
            .staff()
            .create(&NewStaff {
                email: email.to_string(),
                firstname: "Test".to_string(),
                surname: email.split('@').next().unwrap_or("user").to_string(),
                password_hash,
                access_level,
            })
            .await
            .expect("Failed to create staff")
            .id
    }

    /// Insert an invitation with explicit timestamps
    pub async fn insert_invitation(
        &self,
        code: &str,
        created_by: StaffId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) {
        let code: InvitationCode = code.parse().expect("valid invitation code");
        self.db
            .invitations()
            .insert(&NewInvitation {
                code,
                created_by,
                created_at,
                expires_at,
            })
            .await
            .expect("Failed to insert invitation");
    }

    /// Login and return the session token from the body
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Make a request authenticated with a bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let auth = token.map(|t| (AUTHORIZATION, format!("Bearer {t}")));
        self.send(method, path, body, auth).await
    }

    /// Make a request authenticated with the session cookie
    pub async fn request_with_cookie(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: &str,
    ) -> TestResponse {
        let cookie = format!("{}={token}", self.config.session.cookie_name);
        self.send(method, path, body, Some((COOKIE, cookie))).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        header: Option<(http::header::HeaderName, String)>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");

        if let Some((name, value)) = header {
            req = req.header(name, value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            set_cookie,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// `Set-Cookie` header, if any
    pub set_cookie: Option<String>,
    /// Parsed JSON body
    pub body: Value,
}
