mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::json;
use shared::models::{Course, StudentWithFees};

#[tokio::test]
async fn test_course_crud() {
    let app = TestApp::new().await;

    let res = app
        .post(
            "/api/courses",
            json!({"name": "Tailoring", "description": "Basic sewing", "duration": "3 months", "price": 12000}),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    let course: Course = res.json();
    assert_eq!(course.price, Some(12000.0));
    assert!(!course.is_deleted);

    app.course("Beautician", None).await;
    let courses: Vec<Course> = app.get("/api/courses").await.json();
    let names: Vec<_> = courses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Beautician", "Tailoring"]);

    let res = app
        .put(&format!("/api/courses/{}", course.id), json!({"price": 15000}))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let updated: Course = res.json();
    assert_eq!(updated.price, Some(15000.0));
    assert_eq!(updated.duration.as_deref(), Some("3 months"));

    let res = app.delete(&format!("/api/courses/{}", course.id)).await;
    assert_eq!(res.status, StatusCode::OK);
    let res = app.get(&format!("/api/courses/{}", course.id)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.code(), 3001);
    let res = app.delete(&format!("/api/courses/{}", course.id)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_course_validation() {
    let app = TestApp::new().await;

    let res = app
        .post("/api/courses", json!({"name": "Tailoring", "price": -1}))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.code(), 3002);

    let res = app.post("/api/courses", json!({"name": ""})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.code(), 7);

    let res = app.put("/api/courses/12345", json!({"price": 10})).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_course_leaves_fee_totals() {
    let app = TestApp::new().await;
    let tailoring = app.course("Tailoring", Some(1000.0)).await;
    let computer = app.course("Computer", Some(3000.0)).await;
    let student = app.student("Sita", &[tailoring, computer]).await;
    let enrollment = app.enrollment_of(student, computer).await;
    app.pay(enrollment, 500.0, 0.0, "2025-01-01").await;

    let view: StudentWithFees = app.get(&format!("/api/students/{student}")).await.json();
    assert_eq!(view.fees.total_fees, 4000.0);
    assert_eq!(view.fees.total_paid, 500.0);

    app.delete(&format!("/api/courses/{computer}")).await;

    let view: StudentWithFees = app.get(&format!("/api/students/{student}")).await.json();
    assert_eq!(view.courses.len(), 1);
    assert_eq!(view.fees.total_fees, 1000.0);
    assert_eq!(view.fees.total_paid, 0.0);
    assert_eq!(view.fees.due_amount, 1000.0);
}
