//! Course Model

use serde::{Deserialize, Serialize};

/// Course entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Free-form duration, e.g. "3 months"
    pub duration: Option<String>,
    /// Full course fee; a course without price counts as 0 in fee totals
    pub price: Option<f64>,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create course payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCreate {
    pub name: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub price: Option<f64>,
}

/// Update course payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub price: Option<f64>,
}
