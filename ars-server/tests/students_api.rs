mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::json;
use shared::models::{PaymentOverview, PaymentStatus, StudentWithFees};

#[tokio::test]
async fn test_create_student_with_courses() {
    let app = TestApp::new().await;
    let tailoring = app.course("Tailoring", Some(10000.0)).await;
    let computer = app.course("Computer Basics", Some(5000.0)).await;

    let id = app.student("Sita", &[tailoring, computer, tailoring]).await;

    let res = app.get(&format!("/api/students/{id}")).await;
    assert_eq!(res.status, StatusCode::OK);
    let student: StudentWithFees = res.json();
    assert_eq!(student.student.name, "Sita");
    assert_eq!(student.courses.len(), 2);
    assert_eq!(student.fees.raw_fees, 15000.0);
    assert_eq!(student.fees.status, PaymentStatus::Due);
}

#[tokio::test]
async fn test_create_student_with_unknown_course_writes_nothing() {
    let app = TestApp::new().await;
    let res = app
        .post(
            "/api/students",
            json!({"name": "Ram", "email": "ram@school.test", "course_ids": [12345]}),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let list = app.get("/api/students").await;
    assert_eq!(list.body, json!([]));
}

#[tokio::test]
async fn test_create_student_validates_input() {
    let app = TestApp::new().await;
    let res = app
        .post("/api/students", json!({"name": "  ", "email": "x@y.z"}))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.code(), 7);

    let res = app
        .post("/api/students", json!({"name": "Hari", "email": "not-an-email"}))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .post(
            "/api/students",
            json!({"name": "Hari", "email": "hari@school.test", "start_date": "tomorrow"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_student_only_adds_courses() {
    let app = TestApp::new().await;
    let a = app.course("Tailoring", Some(1000.0)).await;
    let b = app.course("Beautician", Some(2000.0)).await;
    let id = app.student("Gita", &[a]).await;

    let res = app
        .put(
            &format!("/api/students/{id}"),
            json!({"phone": "9811111111", "course_ids": [b]}),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    let student: StudentWithFees = res.json();
    assert_eq!(student.student.phone.as_deref(), Some("9811111111"));
    assert_eq!(student.student.name, "Gita");
    let mut course_ids: Vec<i64> = student.courses.iter().map(|c| c.course_id).collect();
    course_ids.sort();
    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(course_ids, expected);
}

#[tokio::test]
async fn test_soft_delete_hides_student() {
    let app = TestApp::new().await;
    let id = app.student("Ram", &[]).await;

    let res = app.delete(&format!("/api/students/{id}")).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.get(&format!("/api/students/{id}")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.code(), 2001);

    let res = app.delete(&format!("/api/students/{id}")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let list = app.get("/api/students").await;
    assert_eq!(list.body, json!([]));
}

#[tokio::test]
async fn test_payment_overview() {
    let app = TestApp::new().await;
    let course = app.course("Tailoring", Some(1000.0)).await;

    let paid = app.student("Ram", &[course]).await;
    let partial = app.student("Sita", &[course]).await;
    let _due = app.student("Hari", &[course]).await;
    let _not_enrolled = app.student("Gita", &[]).await;

    let e = app.enrollment_of(paid, course).await;
    app.pay(e, 900.0, 100.0, "2025-01-10").await;
    let e = app.enrollment_of(partial, course).await;
    app.pay(e, 400.0, 0.0, "2025-01-11").await;

    let res = app.get("/api/students/overview").await;
    assert_eq!(res.status, StatusCode::OK);
    let overview: PaymentOverview = res.json();
    assert_eq!(overview.stats.total, 3);
    assert_eq!(overview.stats.paid, 1);
    assert_eq!(overview.stats.partial, 1);
    assert_eq!(overview.stats.due, 1);
    assert_eq!(overview.stats.total_due_amount, 1600.0);
    let names: Vec<&str> = overview
        .students
        .iter()
        .map(|s| s.student.name.as_str())
        .collect();
    assert_eq!(names, ["Hari", "Sita", "Ram"]);

    let res = app.get("/api/students/overview?status=paid&search=ra").await;
    let overview: PaymentOverview = res.json();
    assert_eq!(overview.students.len(), 1);
    assert_eq!(overview.students[0].fees.status, PaymentStatus::Paid);
    assert_eq!(overview.students[0].fees.total_fees, 900.0);

    let res = app.get("/api/students/overview?status=bogus").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}
