//! Payment Model

use serde::{Deserialize, Serialize};

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentMethod {
    Cash,
    Esewa,
    Banking,
}

/// Payment entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: i64,
    pub enrollment_id: i64,
    pub amount: f64,
    pub discount: f64,
    pub payment_method: PaymentMethod,
    /// YYYY-MM-DD
    pub payment_date: String,
    pub remarks: String,
    pub deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payment joined with its enrollment, student and course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaymentDetail {
    pub id: i64,
    pub enrollment_id: i64,
    pub amount: f64,
    pub discount: f64,
    pub payment_method: PaymentMethod,
    pub payment_date: String,
    pub remarks: String,
    pub student_id: i64,
    pub student_name: String,
    pub course_id: i64,
    pub course_name: String,
    pub course_price: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub enrollment_id: i64,
    pub amount: f64,
    #[serde(default)]
    pub discount: Option<f64>,
    pub payment_method: PaymentMethod,
    pub payment_date: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Update payment payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub amount: Option<f64>,
    pub discount: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_date: Option<String>,
    pub remarks: Option<String>,
}
