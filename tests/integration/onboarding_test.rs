//! End-to-end onboarding: an admin issues an invitation, a new staff
//! member registers with it and gets staff-level access.

mod helpers;

use chrono::{DateTime, Duration, Utc};
use http::StatusCode;
use serde_json::json;

use portal_entity::staff::AccessLevel;

fn is_invitation_shape(code: &str) -> bool {
    let groups: Vec<&str> = code.split('-').collect();
    groups.len() == 4
        && groups
            .iter()
            .all(|g| g.len() == 4 && g.chars().all(|c| c.is_ascii_lowercase()))
}

#[tokio::test]
async fn test_admin_invites_staff_who_cannot_delete_events() {
    let app = helpers::TestApp::new();
    let admin_id = app
        .create_staff("head@school.test", "adminpass", AccessLevel::Admin)
        .await;
    let admin_token = app.login("head@school.test", "adminpass").await;

    // Admin generates a three-day invitation.
    let before = Utc::now();
    let generated = app
        .request(
            "POST",
            "/api/auth/generate-token",
            Some(json!({ "lifespanDays": 3 })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(generated.status, StatusCode::OK, "{:?}", generated.body);
    assert_eq!(generated.body["lifespanDays"], 3);

    let code = generated.body["token"].as_str().unwrap().to_string();
    assert!(is_invitation_shape(&code), "unexpected code {code}");

    let expires_at: DateTime<Utc> = generated.body["expiresAt"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(expires_at >= before + Duration::days(3) - Duration::seconds(5));
    assert!(expires_at <= Utc::now() + Duration::days(3) + Duration::seconds(5));

    let stored = app
        .db
        .invitations()
        .find_by_code(&code)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.created_by, Some(admin_id));
    assert!(!stored.used);

    // New staff member registers and logs in.
    let registered = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "newbie@school.test",
                "password": "first-day",
                "firstname": "Ada",
                "surname": "Newton",
                "token": code,
            })),
            None,
        )
        .await;
    assert_eq!(registered.status, StatusCode::OK, "{:?}", registered.body);

    let staff_token = app.login("newbie@school.test", "first-day").await;

    // An admin creates an event the new member can see but not delete.
    let created = app
        .request(
            "POST",
            "/api/events",
            Some(json!({
                "eventName": "Induction",
                "staffId": admin_id.get(),
                "totalSpaces": 12,
                "startTime": "2025-09-01T09:00:00Z",
                "endTime": "2025-09-01T11:00:00Z",
            })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    let event_id = created.body["eventId"].as_i64().unwrap();

    let listed = app
        .request("GET", "/api/events", None, Some(&staff_token))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["events"][0]["eventName"], "Induction");
    assert_eq!(listed.body["events"][0]["signUpPercentage"], 0);

    let denied = app
        .request(
            "DELETE",
            &format!("/api/events/{event_id}"),
            None,
            Some(&staff_token),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_generate_token_guards() {
    let app = helpers::TestApp::new();
    app.create_staff("head@school.test", "adminpass", AccessLevel::Admin)
        .await;
    app.create_staff("jo@school.test", "password123", AccessLevel::Staff)
        .await;
    let admin_token = app.login("head@school.test", "adminpass").await;
    let staff_token = app.login("jo@school.test", "password123").await;

    let anonymous = app
        .request(
            "POST",
            "/api/auth/generate-token",
            Some(json!({ "lifespanDays": 1 })),
            None,
        )
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let not_admin = app
        .request(
            "POST",
            "/api/auth/generate-token",
            Some(json!({ "lifespanDays": 1 })),
            Some(&staff_token),
        )
        .await;
    assert_eq!(not_admin.status, StatusCode::FORBIDDEN);
    assert_eq!(not_admin.body["message"], "Access denied. Admin required.");

    for bad in [json!({ "lifespanDays": 5 }), json!({})] {
        let response = app
            .request(
                "POST",
                "/api/auth/generate-token",
                Some(bad),
                Some(&admin_token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body["message"],
            "Invalid lifespan. Must be 1, 3, or 7 days."
        );
    }

    let tokens = app.db.invitations().list().await.unwrap();
    assert!(tokens.is_empty());
}

#[tokio::test]
async fn test_generate_token_checks_admin_before_body() {
    let app = helpers::TestApp::new();
    app.create_staff("head@school.test", "adminpass", AccessLevel::Admin)
        .await;
    app.create_staff("jo@school.test", "password123", AccessLevel::Staff)
        .await;
    let admin_token = app.login("head@school.test", "adminpass").await;
    let staff_token = app.login("jo@school.test", "password123").await;

    let not_admin = app
        .request("POST", "/api/auth/generate-token", None, Some(&staff_token))
        .await;
    assert_eq!(not_admin.status, StatusCode::FORBIDDEN);
    assert_eq!(not_admin.body["message"], "Access denied. Admin required.");

    let admin = app
        .request("POST", "/api/auth/generate-token", None, Some(&admin_token))
        .await;
    assert_eq!(admin.status, StatusCode::BAD_REQUEST);
    assert_eq!(admin.body["success"], false);
}
