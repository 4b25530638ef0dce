//! Unified error codes for the ARS school office
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Student errors
//! - 3xxx: Course errors
//! - 4xxx: Enrollment errors
//! - 5xxx: Payment errors
//! - 6xxx: Expense errors
//! - 7xxx: Inventory errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the dashboard can switch
/// on them without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 2xxx: Student ====================
    /// Student not found
    StudentNotFound = 2001,

    // ==================== 3xxx: Course ====================
    /// Course not found
    CourseNotFound = 3001,
    /// Course price is invalid
    CourseInvalidPrice = 3002,

    // ==================== 4xxx: Enrollment ====================
    /// Enrollment not found
    EnrollmentNotFound = 4001,
    /// Student is already enrolled in the course
    AlreadyEnrolled = 4002,

    // ==================== 5xxx: Payment ====================
    /// Payment not found
    PaymentNotFound = 5001,
    /// Payment amount must be greater than zero
    PaymentInvalidAmount = 5002,
    /// Payment method is not recognised
    PaymentInvalidMethod = 5003,
    /// Discount must not be negative
    PaymentInvalidDiscount = 5004,

    // ==================== 6xxx: Expense ====================
    /// Expense not found
    ExpenseNotFound = 6001,
    /// Expense amount must be greater than zero
    ExpenseInvalidAmount = 6002,

    // ==================== 7xxx: Inventory ====================
    /// Inventory item not found
    InventoryItemNotFound = 7001,
    /// Stock count must not be negative
    InventoryInvalidStock = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Operation timed out
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Student
            ErrorCode::StudentNotFound => "Student not found",

            // Course
            ErrorCode::CourseNotFound => "Course not found",
            ErrorCode::CourseInvalidPrice => "Course price must not be negative",

            // Enrollment
            ErrorCode::EnrollmentNotFound => "Selected enrollment does not exist",
            ErrorCode::AlreadyEnrolled => "Student is already enrolled in this course",

            // Payment
            ErrorCode::PaymentNotFound => "Payment not found",
            ErrorCode::PaymentInvalidAmount => "Amount must be greater than 0",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",
            ErrorCode::PaymentInvalidDiscount => "Discount must not be negative",

            // Expense
            ErrorCode::ExpenseNotFound => "Expense not found",
            ErrorCode::ExpenseInvalidAmount => "Amount must be greater than 0",

            // Inventory
            ErrorCode::InventoryItemNotFound => "Inventory item not found",
            ErrorCode::InventoryInvalidStock => "Stock count must not be negative",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Student
            2001 => Ok(ErrorCode::StudentNotFound),

            // Course
            3001 => Ok(ErrorCode::CourseNotFound),
            3002 => Ok(ErrorCode::CourseInvalidPrice),

            // Enrollment
            4001 => Ok(ErrorCode::EnrollmentNotFound),
            4002 => Ok(ErrorCode::AlreadyEnrolled),

            // Payment
            5001 => Ok(ErrorCode::PaymentNotFound),
            5002 => Ok(ErrorCode::PaymentInvalidAmount),
            5003 => Ok(ErrorCode::PaymentInvalidMethod),
            5004 => Ok(ErrorCode::PaymentInvalidDiscount),

            // Expense
            6001 => Ok(ErrorCode::ExpenseNotFound),
            6002 => Ok(ErrorCode::ExpenseInvalidAmount),

            // Inventory
            7001 => Ok(ErrorCode::InventoryItemNotFound),
            7002 => Ok(ErrorCode::InventoryInvalidStock),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
