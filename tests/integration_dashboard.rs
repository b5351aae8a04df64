mod common;

use axum::http::StatusCode;
use common::{TestApp, json_body, location};
use serde_json::json;
use uuid::Uuid;

use schoolhub_models::payments::PaymentStatus;
use schoolhub_models::roles::UserRole;

#[tokio::test]
async fn test_dashboard_page_for_own_role() {
    let app = TestApp::new();
    let student = app.create_user(UserRole::Student).await;

    let response = app.get("/dashboard/student", Some(&student.token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["role"], "student");
    assert_eq!(body["title"], "Student Dashboard");
    assert_eq!(body["user"]["id"], student.id.to_string());
    assert_eq!(body["sidebar"][0]["href"], "/dashboard/student");
}

#[tokio::test]
async fn test_dashboard_page_for_other_role_is_forbidden() {
    let app = TestApp::new();
    let parent = app.create_user(UserRole::Parent).await;

    let response = app.get("/dashboard/admin", Some(&parent.token)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["error"], "Unauthorized");

    let response = app.get("/dashboard/admin/analytics", Some(&parent.token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dashboard_root_redirects_to_role() {
    let app = TestApp::new();
    let teacher = app.create_user(UserRole::Teacher).await;

    let response = app.get("/dashboard", Some(&teacher.token)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/dashboard/teacher"));
}

#[tokio::test]
async fn test_dashboard_sections() {
    let app = TestApp::new();
    let student = app.create_user(UserRole::Student).await;

    let response = app.get("/dashboard/student/results", Some(&student.token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["title"], "Results");

    let response = app.get("/dashboard/student/grading", Some(&student.token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/dashboard/janitor", Some(&student.token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_data_is_role_scoped() {
    let app = TestApp::new();
    let student = app.create_user(UserRole::Student).await;

    let response = app.get("/api/dashboard/admin", Some(&student.token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.get("/api/dashboard/student", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_dashboard_counts() {
    let app = TestApp::new();
    let admin = app.create_user(UserRole::Admin).await;

    app.post("/api/classes", Some(&admin.token), json!({ "name": "JSS 1 A" }))
        .await;
    for number in ["ADM-1", "ADM-2"] {
        app.post(
            "/api/students",
            Some(&admin.token),
            json!({ "admission_number": number }),
        )
        .await;
    }

    let response = app.get("/api/dashboard/admin", Some(&admin.token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["stats"]["students"], 2);
    assert_eq!(body["stats"]["classes"], 1);
    assert_eq!(body["stats"]["teachers"], 0);
    assert_eq!(body["recentStudents"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_student_without_record_gets_empty_dashboard() {
    let app = TestApp::new();
    let student = app.create_user(UserRole::Student).await;

    let response = app.get("/api/dashboard/student", Some(&student.token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["student"].is_null());
    assert_eq!(body["assignments"], json!([]));
    assert_eq!(body["grades"], json!([]));
    assert_eq!(body["attendance"], json!([]));
}

#[tokio::test]
async fn test_student_dashboard_shows_own_grades() {
    let app = TestApp::new();
    let admin = app.create_user(UserRole::Admin).await;
    let student = app.create_user(UserRole::Student).await;

    let created = json_body(
        app.post(
            "/api/students",
            Some(&admin.token),
            json!({ "user_id": student.id, "admission_number": "ADM-9" }),
        )
        .await,
    )
    .await;
    let student_row = created[0]["id"].as_str().unwrap().to_string();

    let subject = app.provider.add_subject("Mathematics", "MTH").await;
    app.post(
        "/api/grades",
        Some(&admin.token),
        json!({ "student_id": student_row, "subject_id": subject.id, "score": 91 }),
    )
    .await;

    let body = json_body(app.get("/api/dashboard/student", Some(&student.token)).await).await;
    assert_eq!(body["student"]["admission_number"], "ADM-9");
    assert_eq!(body["grades"][0]["grade"], "A");
    assert_eq!(body["grades"][0]["subjects"]["name"], "Mathematics");
}

#[tokio::test]
async fn test_parent_dashboard_lists_children_and_payments() {
    let app = TestApp::new();
    let admin = app.create_user(UserRole::Admin).await;
    let parent = app.create_user(UserRole::Parent).await;
    let parent_row = app.provider.add_parent(parent.id, Some("08030000000")).await;

    let created = json_body(
        app.post(
            "/api/students",
            Some(&admin.token),
            json!({ "admission_number": "ADM-7", "parent_id": parent_row.id }),
        )
        .await,
    )
    .await;
    let child: Uuid = created[0]["id"].as_str().unwrap().parse().unwrap();

    let payment = json_body(
        app.post(
            "/api/payments",
            Some(&parent.token),
            json!({ "student_id": child, "amount": 25000.0 }),
        )
        .await,
    )
    .await;
    let payment_id: Uuid = payment[0]["id"].as_str().unwrap().parse().unwrap();
    app.provider
        .set_payment_status(payment_id, PaymentStatus::Completed)
        .await;

    let response = app.get("/api/dashboard/parent", Some(&parent.token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["parent"]["phone"], "08030000000");
    assert_eq!(body["children"][0]["admission_number"], "ADM-7");
    assert_eq!(body["payments"][0]["status"], "completed");
}
