//! Fee and payment aggregate types
//!
//! The numbers are computed server-side; these are the shapes on the wire.

use serde::{Deserialize, Serialize};

/// Payment status of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Partial,
    Due,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Due => "Due",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "partial" => Ok(PaymentStatus::Partial),
            "due" => Ok(PaymentStatus::Due),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// Per-student fee totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSummary {
    pub total_paid: f64,
    /// Sum of enrolled course prices before discounts
    pub raw_fees: f64,
    pub total_discount: f64,
    /// `raw_fees - total_discount`
    pub total_fees: f64,
    /// Never negative
    pub due_amount: f64,
    pub status: PaymentStatus,
}

/// Totals over a list of payments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTotals {
    pub total_received: f64,
    pub fully_paid_count: i64,
    pub total_due: f64,
}

/// Status counters over enrolled students
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentStats {
    pub total: i64,
    pub paid: i64,
    pub partial: i64,
    pub due: i64,
    pub total_due_amount: f64,
}

/// One point of the daily income chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomePoint {
    /// YYYY-MM-DD
    pub date: String,
    pub amount: f64,
}
