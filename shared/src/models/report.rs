//! Report Models

use serde::{Deserialize, Serialize};

use super::finance::PaymentStats;
use super::payment::PaymentDetail;
use super::student::StudentWithFees;

/// Payments received in a date range (inclusive)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReport {
    pub start_date: String,
    pub end_date: String,
    pub total_received: f64,
    pub total_discount: f64,
    pub total_transactions: i64,
    pub payments: Vec<PaymentDetail>,
}

/// Income vs expenses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub profit: f64,
}

/// Student payment overview page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOverview {
    pub stats: PaymentStats,
    pub students: Vec<StudentWithFees>,
}
