//! Totals over payment lists, daily income and report figures

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use shared::models::{FinanceSummary, IncomePoint, PaymentDetail, PaymentReport, PaymentTotals};

use super::money::{sum, to_decimal, to_f64};
use crate::utils::time::date_part;

/// Header figures of the payments page
///
/// An enrollment is fully paid once the sum of its payments reaches the course
/// price; `total_due` only covers enrollments that have at least one payment.
pub fn payment_totals(payments: &[PaymentDetail]) -> PaymentTotals {
    // enrollment_id -> (paid so far, course price)
    let mut per_enrollment: HashMap<i64, (Decimal, Decimal)> = HashMap::new();
    for p in payments {
        let entry = per_enrollment
            .entry(p.enrollment_id)
            .or_insert((Decimal::ZERO, to_decimal(p.course_price.unwrap_or(0.0))));
        entry.0 += to_decimal(p.amount);
    }

    let fully_paid_count = per_enrollment
        .values()
        .filter(|(paid, price)| paid >= price)
        .count() as i64;
    let total_due: Decimal = per_enrollment
        .values()
        .map(|(paid, price)| (*price - *paid).max(Decimal::ZERO))
        .sum();

    PaymentTotals {
        total_received: to_f64(sum(payments.iter().map(|p| p.amount))),
        fully_paid_count,
        total_due: to_f64(total_due),
    }
}

/// Income per calendar day, ascending, optionally limited to `[start, end]`
pub fn daily_income(
    payments: &[PaymentDetail],
    start: Option<&str>,
    end: Option<&str>,
) -> Vec<IncomePoint> {
    let mut days: BTreeMap<&str, Decimal> = BTreeMap::new();
    for p in payments {
        let day = date_part(&p.payment_date);
        if start.is_some_and(|s| day < s) || end.is_some_and(|e| day > e) {
            continue;
        }
        *days.entry(day).or_default() += to_decimal(p.amount);
    }

    days.into_iter()
        .map(|(date, amount)| IncomePoint {
            date: date.to_string(),
            amount: to_f64(amount),
        })
        .collect()
}

/// Totals of the payments received between `start` and `end`
///
/// `payments` must already be limited to that range.
pub fn payment_report(start: &str, end: &str, payments: Vec<PaymentDetail>) -> PaymentReport {
    PaymentReport {
        start_date: start.to_string(),
        end_date: end.to_string(),
        total_received: to_f64(sum(payments.iter().map(|p| p.amount))),
        total_discount: to_f64(sum(payments.iter().map(|p| p.discount))),
        total_transactions: payments.len() as i64,
        payments,
    }
}

/// Income (live payments) against expenses
pub fn finance_summary(payment_amounts: &[f64], expense_amounts: &[f64]) -> FinanceSummary {
    let income = sum(payment_amounts.iter().copied());
    let expenses = sum(expense_amounts.iter().copied());
    FinanceSummary {
        total_income: to_f64(income),
        total_expenses: to_f64(expenses),
        profit: to_f64(income - expenses),
    }
}
