mod common;

use axum::http::StatusCode;
use common::{TestApp, json_body};
use serde_json::json;

use schoolhub_models::roles::UserRole;

#[tokio::test]
async fn test_protected_lists_require_session() {
    let app = TestApp::new();

    for uri in [
        "/api/students",
        "/api/teachers",
        "/api/classes",
        "/api/assignments",
        "/api/grades",
        "/api/attendance",
        "/api/payments",
    ] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(json_body(response).await["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn test_protected_writes_require_session() {
    let app = TestApp::new();

    for uri in [
        "/api/students",
        "/api/teachers",
        "/api/classes",
        "/api/assignments",
        "/api/grades",
        "/api/attendance",
        "/api/payments",
        "/api/events",
        "/api/blog",
    ] {
        let response = app.post(uri, None, json!({})).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(json_body(response).await, json!({ "error": "Unauthorized" }), "{}", uri);
    }

    let response = app.post("/api/contact", None, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_events_and_blog_are_public() {
    let app = TestApp::new();

    for uri in ["/api/events", "/api/blog"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        assert_eq!(json_body(response).await, json!([]));
    }
}

#[tokio::test]
async fn test_student_cannot_create_grade() {
    let app = TestApp::new();
    let student = app.create_user(UserRole::Student).await;

    let response = app
        .post("/api/grades", Some(&student.token), json!({ "score": 95 }))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["error"], "Forbidden");
}

#[tokio::test]
async fn test_authorization_checked_before_body() {
    let app = TestApp::new();
    let parent = app.create_user(UserRole::Parent).await;

    let response = app
        .post("/api/classes", Some(&parent.token), json!("not an object"))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.post("/api/classes", None, json!("not an object")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_teacher_reads_students_but_cannot_create() {
    let app = TestApp::new();
    let teacher = app.create_user(UserRole::Teacher).await;

    let response = app.get("/api/students", Some(&teacher.token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post("/api/students", Some(&teacher.token), json!({}))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.get("/api/teachers", Some(&teacher.token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_creates_class_and_student() {
    let app = TestApp::new();
    let admin = app.create_user(UserRole::Admin).await;

    let response = app
        .post(
            "/api/classes",
            Some(&admin.token),
            json!({ "name": "JSS 1 A", "level": "JSS 1", "capacity": 40 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let classes = json_body(response).await;
    assert_eq!(classes.as_array().map(Vec::len), Some(1));
    assert_eq!(classes[0]["name"], "JSS 1 A");
    let class_id = classes[0]["id"].as_str().unwrap().to_string();

    let response = app
        .post(
            "/api/students",
            Some(&admin.token),
            json!({
                "admission_number": "ADM-001",
                "class_id": class_id,
                "date_of_birth": "2012-03-14"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let students = json_body(response).await;
    assert_eq!(students[0]["admission_number"], "ADM-001");
    assert_eq!(students[0]["status"], "active");

    let listed = json_body(app.get("/api/students", Some(&admin.token)).await).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["classes"]["name"], "JSS 1 A");
}

#[tokio::test]
async fn test_classes_listed_by_name() {
    let app = TestApp::new();
    let admin = app.create_user(UserRole::Admin).await;

    for name in ["SSS 1 B", "JSS 2 A", "JSS 1 C"] {
        let response = app
            .post("/api/classes", Some(&admin.token), json!({ "name": name }))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let parent = app.create_user(UserRole::Parent).await;
    let listed = json_body(app.get("/api/classes", Some(&parent.token)).await).await;
    let names: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["JSS 1 C", "JSS 2 A", "SSS 1 B"]);
}

#[tokio::test]
async fn test_teacher_grade_gets_letter_from_score() {
    let app = TestApp::new();
    let teacher = app.create_user(UserRole::Teacher).await;

    let response = app
        .post(
            "/api/grades",
            Some(&teacher.token),
            json!({ "term": "First Term", "score": 83.5 }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let grades = json_body(response).await;
    assert_eq!(grades[0]["grade"], "B");
    assert_eq!(grades[0]["score"], 83.5);
}

#[tokio::test]
async fn test_explicit_grade_letter_is_kept() {
    let app = TestApp::new();
    let admin = app.create_user(UserRole::Admin).await;

    let response = app
        .post(
            "/api/grades",
            Some(&admin.token),
            json!({ "score": 83.5, "grade": "A-" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await[0]["grade"], "A-");
}

#[tokio::test]
async fn test_any_session_records_payment() {
    let app = TestApp::new();
    let parent = app.create_user(UserRole::Parent).await;

    let response = app
        .post(
            "/api/payments",
            Some(&parent.token),
            json!({ "amount": 15000.0, "description": "First term fees" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let payments = json_body(response).await;
    assert_eq!(payments[0]["status"], "pending");
    assert_eq!(payments[0]["amount"], 15000.0);
}

#[tokio::test]
async fn test_admin_event_records_creator() {
    let app = TestApp::new();
    let admin = app.create_user(UserRole::Admin).await;

    let response = app
        .post(
            "/api/events",
            Some(&admin.token),
            json!({ "title": "Inter-house Sports", "location": "School field" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let events = json_body(response).await;
    assert_eq!(events[0]["created_by"], admin.id.to_string());

    let listed = json_body(app.get("/api/events", None).await).await;
    assert_eq!(listed[0]["title"], "Inter-house Sports");
}

#[tokio::test]
async fn test_teacher_cannot_create_event() {
    let app = TestApp::new();
    let teacher = app.create_user(UserRole::Teacher).await;

    let response = app
        .post("/api/events", Some(&teacher.token), json!({ "title": "Party" }))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_only_published_posts_are_listed() {
    let app = TestApp::new();
    let admin = app.create_user(UserRole::Admin).await;

    for (title, published) in [("Draft", false), ("Welcome back", true)] {
        let response = app
            .post(
                "/api/blog",
                Some(&admin.token),
                json!({ "title": title, "published": published }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed = json_body(app.get("/api/blog", None).await).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["title"], "Welcome back");
}

#[tokio::test]
async fn test_contact_message_is_stored() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/contact",
            None,
            json!({
                "name": "Ngozi",
                "email": "ngozi@example.com",
                "subject": "Admissions",
                "message": "When does the new session start?"
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Message sent successfully");
    assert_eq!(body["data"][0]["subject"], "Admissions");
    assert_eq!(app.provider.contact_messages().await.len(), 1);
}

#[tokio::test]
async fn test_contact_missing_fields_writes_nothing() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/contact",
            None,
            json!({ "name": "Ngozi", "email": "ngozi@example.com", "subject": "" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Missing required fields");
    assert!(app.provider.contact_messages().await.is_empty());
}
