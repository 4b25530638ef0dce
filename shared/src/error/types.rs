//! Error type and the error body returned by the API

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error: a code, a message for the office staff, and optional details
///
/// Handlers return it directly; it renders as an [`ApiResponse`] with the
/// status of its code.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// Field name, offending id, and similar context
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the default message of `code`
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Name the form field the error belongs to
    pub fn for_field(self, field: &str) -> Self {
        self.with_detail("field", field)
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Error body of every failed request
///
/// Successful requests return their payload as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ApiResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();
        match self.code.category() {
            ErrorCategory::System => {
                tracing::error!(code = %self.code, message = %self.message, "Request failed")
            }
            _ => tracing::debug!(code = %self.code, message = %self.message, "Request rejected"),
        }

        (status, axum::Json(ApiResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_default_message() {
        let err = AppError::new(ErrorCode::StudentNotFound);
        assert_eq!(err.code, ErrorCode::StudentNotFound);
        assert_eq!(err.message, "Student not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_details() {
        let err = AppError::new(ErrorCode::RequiredField)
            .for_field("name")
            .with_detail("max", 200);

        let details = err.details.unwrap();
        assert_eq!(details["field"], "name");
        assert_eq!(details["max"], 200);
    }

    #[test]
    fn test_display_is_message() {
        let err = AppError::with_message(ErrorCode::PaymentNotFound, "Payment 7 not found");
        assert_eq!(err.to_string(), "Payment 7 not found");
    }

    #[test]
    fn test_error_body() {
        let err = AppError::new(ErrorCode::PaymentInvalidAmount).with_detail("amount", 0);
        let body = ApiResponse::from(&err);
        assert_eq!(body.code, 5002);
        assert_eq!(body.message, "Amount must be greater than 0");

        let json = serde_json::to_value(ApiResponse::from(&AppError::internal("boom"))).unwrap();
        assert_eq!(json, serde_json::json!({"code": 9001, "message": "boom"}));
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::new(ErrorCode::AlreadyEnrolled).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::database("locked").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
