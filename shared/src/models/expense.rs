//! Expense Model

use serde::{Deserialize, Serialize};

/// Expense entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Expense {
    pub id: i64,
    /// YYYY-MM-DD
    pub date: String,
    /// What the money was spent on / paid to
    pub source: String,
    pub amount: f64,
    pub bill_number: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCreate {
    pub date: String,
    pub source: String,
    pub amount: f64,
    pub bill_number: Option<String>,
}

/// Update expense payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    pub date: Option<String>,
    pub source: Option<String>,
    pub amount: Option<f64>,
    pub bill_number: Option<String>,
}
