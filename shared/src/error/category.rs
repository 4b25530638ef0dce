//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 2xxx: Student errors
/// - 3xxx: Course errors
/// - 4xxx: Enrollment errors
/// - 5xxx: Payment errors
/// - 6xxx: Expense errors
/// - 7xxx: Inventory errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx, plus unassigned ranges)
    General,
    /// Student errors (2xxx)
    Student,
    /// Course errors (3xxx)
    Course,
    /// Enrollment errors (4xxx)
    Enrollment,
    /// Payment errors (5xxx)
    Payment,
    /// Expense errors (6xxx)
    Expense,
    /// Inventory errors (7xxx)
    Inventory,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            2000..3000 => Self::Student,
            3000..4000 => Self::Course,
            4000..5000 => Self::Enrollment,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Expense,
            7000..8000 => Self::Inventory,
            9000.. => Self::System,
            _ => Self::General,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Student => "student",
            Self::Course => "course",
            Self::Enrollment => "enrollment",
            Self::Payment => "payment",
            Self::Expense => "expense",
            Self::Inventory => "inventory",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1500), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Student);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Course);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Enrollment);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Payment);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Expense);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::Inventory);
        assert_eq!(ErrorCategory::from_code(8500), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::StudentNotFound.category(), ErrorCategory::Student);
        assert_eq!(ErrorCode::PaymentNotFound.category(), ErrorCategory::Payment);
        assert_eq!(
            ErrorCode::InventoryInvalidStock.category(),
            ErrorCategory::Inventory
        );
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&ErrorCategory::Enrollment).unwrap();
        assert_eq!(json, "\"enrollment\"");

        let category: ErrorCategory = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(category, ErrorCategory::System);
        assert_eq!(category.name(), "system");
    }
}
