//! Shared helpers: a fresh app on a temporary database per test

#![allow(dead_code)]

use ars_server::api::build_app;
use ars_server::{Config, ServerState};
use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    // Keeps the database file alive for the test
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub version: Option<u64>,
    pub body: Value,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_value(self.body.clone()).expect("response body shape")
    }

    /// Error code of an `ApiResponse` error body
    pub fn code(&self) -> u64 {
        self.body["code"].as_u64().expect("error code")
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
        let state = ServerState::initialize(&config).await.expect("state");
        let app = build_app(&state);
        Self {
            app,
            state,
            _dir: dir,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let version = response
            .headers()
            .get("x-resource-version")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            version,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    // ── fixtures ────────────────────────────────────────────────────

    pub async fn course(&self, name: &str, price: Option<f64>) -> i64 {
        let res = self
            .post("/api/courses", json!({"name": name, "duration": "3 months", "price": price}))
            .await;
        assert_eq!(res.status, StatusCode::OK, "create course: {}", res.body);
        res.body["id"].as_i64().expect("course id")
    }

    pub async fn student(&self, name: &str, course_ids: &[i64]) -> i64 {
        let res = self
            .post(
                "/api/students",
                json!({
                    "name": name,
                    "email": format!("{}@school.test", name.to_lowercase()),
                    "phone": "9800000000",
                    "shift": "7:00 to 8:30",
                    "course_ids": course_ids,
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "create student: {}", res.body);
        res.body["id"].as_i64().expect("student id")
    }

    /// Enrollment id of a student's course
    pub async fn enrollment_of(&self, student_id: i64, course_id: i64) -> i64 {
        let res = self.get(&format!("/api/students/{student_id}")).await;
        res.body["courses"]
            .as_array()
            .expect("courses")
            .iter()
            .find(|c| c["course_id"].as_i64() == Some(course_id))
            .and_then(|c| c["enrollment_id"].as_i64())
            .expect("enrollment")
    }

    pub async fn pay(&self, enrollment_id: i64, amount: f64, discount: f64, date: &str) -> i64 {
        let res = self
            .post(
                "/api/payments",
                json!({
                    "enrollment_id": enrollment_id,
                    "amount": amount,
                    "discount": discount,
                    "payment_method": "CASH",
                    "payment_date": date,
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "create payment: {}", res.body);
        res.body["id"].as_i64().expect("payment id")
    }
}
