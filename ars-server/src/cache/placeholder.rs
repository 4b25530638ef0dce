//! Pending rows shown in cached lists while a create is in flight
//!
//! Each builder returns the list's own row type, so a patched list still
//! reads back through [`QueryCache::get_or_load`](super::QueryCache::get_or_load).
//! Pending rows carry [`PENDING_ID`] and the current time.

use shared::models::{
    Course, CourseCreate, EnrollmentDetail, Expense, ExpenseCreate, FeeSummary, InventoryItem,
    InventoryItemCreate, PaymentCreate, PaymentDetail, PaymentStatus, Student, StudentCreate,
    StudentWithFees,
};
use shared::util::now_millis;

use super::patch::PENDING_ID;

pub fn course(data: &CourseCreate) -> Course {
    let now = now_millis();
    Course {
        id: PENDING_ID,
        name: data.name.trim().to_string(),
        description: data.description.clone(),
        duration: data.duration.clone(),
        price: data.price,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}

/// New student without courses; fees start at zero and `Due`
pub fn student(data: &StudentCreate) -> StudentWithFees {
    let now = now_millis();
    StudentWithFees {
        student: Student {
            id: PENDING_ID,
            name: data.name.trim().to_string(),
            email: data.email.trim().to_string(),
            phone: data.phone.clone(),
            address: data.address.clone(),
            gender: data.gender.clone(),
            shift: data.shift.clone(),
            start_date: data.start_date.clone(),
            end_date: data.end_date.clone(),
            parents_name: data.parents_name.clone(),
            parents_phone: data.parents_phone.clone(),
            education_level: data.education_level.clone(),
            deleted: false,
            created_at: now,
            updated_at: now,
        },
        courses: Vec::new(),
        fees: FeeSummary {
            total_paid: 0.0,
            raw_fees: 0.0,
            total_discount: 0.0,
            total_fees: 0.0,
            due_amount: 0.0,
            status: PaymentStatus::Due,
        },
    }
}

pub fn enrollment(
    student_id: i64,
    student_name: &str,
    course: &Course,
) -> EnrollmentDetail {
    EnrollmentDetail {
        id: PENDING_ID,
        student_id,
        student_name: student_name.to_string(),
        course_id: course.id,
        course_name: course.name.clone(),
        course_price: course.price,
        created_at: now_millis(),
    }
}

/// Payment on `enrollment`, with the defaults the insert applies
pub fn payment(data: &PaymentCreate, enrollment: &EnrollmentDetail) -> PaymentDetail {
    let now = now_millis();
    PaymentDetail {
        id: PENDING_ID,
        enrollment_id: enrollment.id,
        amount: data.amount,
        discount: data.discount.unwrap_or(0.0),
        payment_method: data.payment_method,
        payment_date: data.payment_date.clone(),
        remarks: data.remarks.clone().unwrap_or_default(),
        student_id: enrollment.student_id,
        student_name: enrollment.student_name.clone(),
        course_id: enrollment.course_id,
        course_name: enrollment.course_name.clone(),
        course_price: enrollment.course_price,
        created_at: now,
        updated_at: now,
    }
}

pub fn expense(data: &ExpenseCreate) -> Expense {
    let now = now_millis();
    Expense {
        id: PENDING_ID,
        date: data.date.clone(),
        source: data.source.trim().to_string(),
        amount: data.amount,
        bill_number: data.bill_number.clone(),
        created_at: now,
        updated_at: now,
    }
}

pub fn inventory_item(data: &InventoryItemCreate, restock_threshold: i64) -> InventoryItem {
    let now = now_millis();
    InventoryItem {
        id: PENDING_ID,
        name: data.name.trim().to_string(),
        count_in_stock: data.count_in_stock,
        category: data.category.clone(),
        restock_needed: data.count_in_stock < restock_threshold,
        created_at: now,
        updated_at: now,
    }
}
