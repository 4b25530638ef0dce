//! Enrollment Model (student ↔ course)

use serde::{Deserialize, Serialize};

/// Enrollment entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub created_at: i64,
}

/// Enrollment joined with student and course names (for pickers and lists)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EnrollmentDetail {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub course_id: i64,
    pub course_name: String,
    pub course_price: Option<f64>,
    pub created_at: i64,
}

/// Create enrollment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentCreate {
    pub student_id: i64,
    pub course_id: i64,
}
