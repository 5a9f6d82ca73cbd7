//! Integration tests for the event registry.

mod helpers;

use http::StatusCode;
use serde_json::{Value, json};

use portal_core::types::{StaffId, SubjectId};
use portal_entity::staff::AccessLevel;
use portal_entity::subject::NewSubject;

struct Fixture {
    app: helpers::TestApp,
    lecturer: StaffId,
    staff_token: String,
    admin_token: String,
    maths: SubjectId,
    physics: SubjectId,
}

async fn fixture() -> Fixture {
    let app = helpers::TestApp::new();
    let lecturer = app
        .create_staff("jo@school.test", "password123", AccessLevel::Staff)
        .await;
    app.create_staff("head@school.test", "password123", AccessLevel::Admin)
        .await;

    let subject = |name: &str, code: &str| NewSubject {
        name: name.to_string(),
        code: code.to_string(),
        description: None,
    };
    let maths = app.db.subjects().create(&subject("Maths", "MA")).await.unwrap().id;
    let physics = app.db.subjects().create(&subject("Physics", "PH")).await.unwrap().id;

    let staff_token = app.login("jo@school.test", "password123").await;
    let admin_token = app.login("head@school.test", "password123").await;

    Fixture {
        app,
        lecturer,
        staff_token,
        admin_token,
        maths,
        physics,
    }
}

fn payload(staff: StaffId, subjects: &[SubjectId]) -> Value {
    json!({
        "eventName": "Open Evening",
        "location": "Main Hall",
        "detailsShort": "Meet the department",
        "detailsLong": "",
        "staffId": staff.get().to_string(),
        "studentsSignedUp": 5,
        "totalSpaces": "20",
        "startTime": "2025-06-01T18:00",
        "endTime": "2025-06-01T20:00",
        "subjects": subjects.iter().map(|s| json!({ "id": s.get() })).collect::<Vec<_>>(),
    })
}

impl Fixture {
    async fn create(&self, body: Value) -> i64 {
        let response = self
            .app
            .request("POST", "/api/events", Some(body), Some(&self.staff_token))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        assert_eq!(response.body["message"], "Event created successfully");
        response.body["eventId"].as_i64().unwrap()
    }

    async fn list(&self) -> Vec<Value> {
        let response = self
            .app
            .request("GET", "/api/events", None, Some(&self.staff_token))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["events"].as_array().unwrap().clone()
    }
}

#[tokio::test]
async fn test_events_require_session() {
    let f = fixture().await;

    let response = f.app.request("GET", "/api/events", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_create_and_list() {
    let f = fixture().await;
    let id = f.create(payload(f.lecturer, &[f.maths, f.physics])).await;

    let events = f.list().await;
    assert_eq!(events.len(), 1);

    let event = &events[0];
    assert_eq!(event["eventId"], id);
    assert_eq!(event["eventName"], "Open Evening");
    assert_eq!(event["staffId"], f.lecturer.get());
    assert_eq!(event["staffName"], "Test jo");
    assert_eq!(event["studentsSignedUp"], 5);
    assert_eq!(event["totalSpaces"], 20);
    assert_eq!(event["signUpPercentage"], 25);
    assert!(event["detailsLong"].is_null());
    assert!(event["created_at"].is_string());

    let codes: Vec<&str> = event["subjects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes.len(), 2);
    assert!(codes.contains(&"MA"));
    assert!(codes.contains(&"PH"));
}

#[tokio::test]
async fn test_list_orders_by_start_descending() {
    let f = fixture().await;
    let mut early = payload(f.lecturer, &[]);
    early["eventName"] = json!("Early");
    early["startTime"] = json!("2025-01-10T09:00");
    early["endTime"] = json!("2025-01-10T10:00");
    f.create(early).await;
    f.create(payload(f.lecturer, &[])).await;

    let names: Vec<String> = f
        .list()
        .await
        .iter()
        .map(|e| e["eventName"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Open Evening", "Early"]);
}

#[tokio::test]
async fn test_create_validation() {
    let f = fixture().await;

    let mut missing = payload(f.lecturer, &[]);
    missing["eventName"] = json!("  ");
    let response = f
        .app
        .request("POST", "/api/events", Some(missing), Some(&f.staff_token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Missing required fields");

    let mut backwards = payload(f.lecturer, &[]);
    backwards["endTime"] = json!("2025-06-01T17:00");
    let response = f
        .app
        .request("POST", "/api/events", Some(backwards), Some(&f.staff_token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "End time must be after start time");

    assert!(f.list().await.is_empty());
}

#[tokio::test]
async fn test_update_replaces_fields_and_links() {
    let f = fixture().await;
    let id = f.create(payload(f.lecturer, &[f.maths, f.physics])).await;

    let mut changed = payload(f.lecturer, &[f.physics]);
    changed["eventName"] = json!("Open Evening (moved)");
    changed["totalSpaces"] = json!(10);
    let response = f
        .app
        .request(
            "PUT",
            &format!("/api/events/{id}"),
            Some(changed),
            Some(&f.staff_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Event updated successfully");

    let events = f.list().await;
    let event = &events[0];
    assert_eq!(event["eventName"], "Open Evening (moved)");
    assert_eq!(event["signUpPercentage"], 50);
    assert_eq!(event["subjects"].as_array().unwrap().len(), 1);
    assert_eq!(event["subjects"][0]["code"], "PH");
}

#[tokio::test]
async fn test_update_unknown_or_malformed_id() {
    let f = fixture().await;

    let response = f
        .app
        .request(
            "PUT",
            "/api/events/9999",
            Some(payload(f.lecturer, &[])),
            Some(&f.staff_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Event not found");

    let response = f
        .app
        .request(
            "PUT",
            "/api/events/abc",
            Some(payload(f.lecturer, &[])),
            Some(&f.staff_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid event id");
}

#[tokio::test]
async fn test_delete_requires_admin_and_cascades() {
    let f = fixture().await;
    let id = f.create(payload(f.lecturer, &[f.maths])).await;
    let path = format!("/api/events/{id}");

    let response = f
        .app
        .request("DELETE", &path, None, Some(&f.staff_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "Only administrators can delete events");
    assert_eq!(f.list().await.len(), 1);

    let response = f
        .app
        .request("DELETE", &path, None, Some(&f.admin_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Event deleted successfully");
    assert!(f.list().await.is_empty());

    let response = f
        .app
        .request("DELETE", &path, None, Some(&f.admin_token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reference_listings() {
    let f = fixture().await;

    let staff = f
        .app
        .request("GET", "/api/staff", None, Some(&f.staff_token))
        .await;
    assert_eq!(staff.status, StatusCode::OK);
    let staff = staff.body["staff"].as_array().unwrap().clone();
    assert_eq!(staff.len(), 2);
    assert!(staff.iter().all(|s| s.get("password_hash").is_none()));
    assert!(staff.iter().any(|s| s["accessLevel"] == "admin"));

    let subjects = f
        .app
        .request("GET", "/api/subjects", None, Some(&f.staff_token))
        .await;
    assert_eq!(subjects.status, StatusCode::OK);
    assert_eq!(subjects.body["subjects"][0]["name"], "Maths");
    assert_eq!(subjects.body["subjects"][1]["name"], "Physics");

    let anonymous = f.app.request("GET", "/api/staff", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}
