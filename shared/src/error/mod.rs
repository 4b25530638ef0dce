//! Unified error system
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Error body returned by the API
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 2xxx: Student errors
//! - 3xxx: Course errors
//! - 4xxx: Enrollment errors
//! - 5xxx: Payment errors
//! - 6xxx: Expense errors
//! - 7xxx: Inventory errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::EnrollmentNotFound);
//! assert_eq!(err.message, "Selected enrollment does not exist");
//!
//! let err = AppError::new(ErrorCode::RequiredField).for_field("email");
//!
//! let body = ApiResponse::from(&err);
//! assert_eq!(body.code, 7);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
