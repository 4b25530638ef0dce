//! Per-student fee summary and the payment overview

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{
    FeeSummary, PaymentStats, PaymentStatus, Student, StudentCourse, StudentWithFees,
};

use super::money::{sum, to_decimal, to_f64};

/// Amount and discount of one live payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PaymentAmount {
    pub enrollment_id: i64,
    pub amount: f64,
    pub discount: f64,
}

/// Fee summary of one student
///
/// `courses` are the student's enrollments; only payments whose enrollment is
/// among them are counted.
pub fn fee_summary(courses: &[StudentCourse], payments: &[PaymentAmount]) -> FeeSummary {
    let counted: Vec<&PaymentAmount> = payments
        .iter()
        .filter(|p| courses.iter().any(|c| c.enrollment_id == p.enrollment_id))
        .collect();

    let total_paid = sum(counted.iter().map(|p| p.amount));
    let total_discount = sum(counted.iter().map(|p| p.discount));
    let raw_fees = sum(courses.iter().map(|c| c.price.unwrap_or(0.0)));
    let total_fees = raw_fees - total_discount;
    let due_amount = (total_fees - total_paid).max(Decimal::ZERO);

    FeeSummary {
        total_paid: to_f64(total_paid),
        raw_fees: to_f64(raw_fees),
        total_discount: to_f64(total_discount),
        total_fees: to_f64(total_fees),
        due_amount: to_f64(due_amount),
        status: status_of(total_paid, total_fees),
    }
}

fn status_of(total_paid: Decimal, total_fees: Decimal) -> PaymentStatus {
    if total_paid.is_zero() {
        PaymentStatus::Due
    } else if total_paid < total_fees {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Paid
    }
}

/// Attach courses and fee summaries to students
///
/// Keeps the order of `students`.
pub fn build_students(
    students: Vec<Student>,
    courses: Vec<StudentCourse>,
    payments: &[PaymentAmount],
) -> Vec<StudentWithFees> {
    let mut by_student: HashMap<i64, Vec<StudentCourse>> = HashMap::new();
    for course in courses {
        by_student.entry(course.student_id).or_default().push(course);
    }

    let mut by_enrollment: HashMap<i64, Vec<PaymentAmount>> = HashMap::new();
    for payment in payments {
        by_enrollment
            .entry(payment.enrollment_id)
            .or_default()
            .push(*payment);
    }

    students
        .into_iter()
        .map(|student| {
            let courses = by_student.remove(&student.id).unwrap_or_default();
            let student_payments: Vec<PaymentAmount> = courses
                .iter()
                .filter_map(|c| by_enrollment.get(&c.enrollment_id))
                .flatten()
                .copied()
                .collect();
            let fees = fee_summary(&courses, &student_payments);
            StudentWithFees {
                student,
                courses,
                fees,
            }
        })
        .collect()
}

/// Status counters over students with at least one enrollment
pub fn payment_stats(students: &[StudentWithFees]) -> PaymentStats {
    let enrolled: Vec<&StudentWithFees> = students.iter().filter(|s| s.has_enrollments()).collect();
    let count = |status: PaymentStatus| {
        enrolled.iter().filter(|s| s.fees.status == status).count() as i64
    };

    PaymentStats {
        total: enrolled.len() as i64,
        paid: count(PaymentStatus::Paid),
        partial: count(PaymentStatus::Partial),
        due: count(PaymentStatus::Due),
        total_due_amount: to_f64(sum(enrolled.iter().map(|s| s.fees.due_amount))),
    }
}

/// Enrolled students matching `search` (case-insensitive name substring) and
/// `status` (`None` = all), unpaid first, then by due amount descending
pub fn payment_overview(
    students: Vec<StudentWithFees>,
    search: Option<&str>,
    status: Option<PaymentStatus>,
) -> Vec<StudentWithFees> {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<StudentWithFees> = students
        .into_iter()
        .filter(|s| s.has_enrollments())
        .filter(|s| {
            needle
                .as_ref()
                .is_none_or(|n| s.student.name.to_lowercase().contains(n.as_str()))
        })
        .filter(|s| status.is_none_or(|st| s.fees.status == st))
        .collect();

    matched.sort_by(|a, b| {
        let a_paid = a.fees.status == PaymentStatus::Paid;
        let b_paid = b.fees.status == PaymentStatus::Paid;
        a_paid.cmp(&b_paid).then_with(|| {
            to_decimal(b.fees.due_amount).cmp(&to_decimal(a.fees.due_amount))
        })
    });
    matched
}
