//! Student Model

use serde::{Deserialize, Serialize};

use super::finance::FeeSummary;

/// Student entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    /// Class time slot, e.g. "8:30 to 10:00"
    pub shift: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub parents_name: Option<String>,
    pub parents_phone: Option<String>,
    pub education_level: Option<String>,
    pub deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create student payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub shift: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub parents_name: Option<String>,
    pub parents_phone: Option<String>,
    pub education_level: Option<String>,
    /// Courses to enroll the new student in
    #[serde(default)]
    pub course_ids: Vec<i64>,
}

/// Update student payload
///
/// `course_ids` only ever adds enrollments; courses already enrolled are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub shift: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub parents_name: Option<String>,
    pub parents_phone: Option<String>,
    pub education_level: Option<String>,
    pub course_ids: Option<Vec<i64>>,
}

/// A course a student is enrolled in (enrollment joined to course)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StudentCourse {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub name: String,
    pub duration: Option<String>,
    pub price: Option<f64>,
}

/// Student with enrolled courses and computed fee summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentWithFees {
    #[serde(flatten)]
    pub student: Student,
    pub courses: Vec<StudentCourse>,
    #[serde(flatten)]
    pub fees: FeeSummary,
}

impl StudentWithFees {
    pub fn has_enrollments(&self) -> bool {
        !self.courses.is_empty()
    }
}
