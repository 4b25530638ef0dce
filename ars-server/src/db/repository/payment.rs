//! Payment Repository

use super::{RepoError, RepoResult};
use crate::billing::PaymentAmount;
use shared::models::{PaymentCreate, PaymentDetail, PaymentUpdate};
use sqlx::SqlitePool;

const PAYMENT_DETAIL_SELECT: &str = "SELECT p.id, p.enrollment_id, p.amount, p.discount, p.payment_method, p.payment_date, p.remarks, e.student_id, s.name AS student_name, e.course_id, c.name AS course_name, c.price AS course_price, p.created_at, p.updated_at FROM payment p JOIN enrollment e ON p.enrollment_id = e.id JOIN student s ON e.student_id = s.id JOIN course c ON e.course_id = c.id";

const ORDER_NEWEST: &str = "ORDER BY p.payment_date DESC, p.created_at DESC";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<PaymentDetail>> {
    let sql = format!("{PAYMENT_DETAIL_SELECT} WHERE p.deleted = 0 {ORDER_NEWEST}");
    let rows = sqlx::query_as::<_, PaymentDetail>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<PaymentDetail>> {
    let sql = format!("{PAYMENT_DETAIL_SELECT} WHERE p.id = ? AND p.deleted = 0");
    let row = sqlx::query_as::<_, PaymentDetail>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Payments whose date falls within `[start, end]` (both `YYYY-MM-DD`)
pub async fn find_in_range(
    pool: &SqlitePool,
    start: &str,
    end: &str,
) -> RepoResult<Vec<PaymentDetail>> {
    let sql = format!(
        "{PAYMENT_DETAIL_SELECT} WHERE p.deleted = 0 AND substr(p.payment_date, 1, 10) >= ?1 AND substr(p.payment_date, 1, 10) <= ?2 {ORDER_NEWEST}"
    );
    let rows = sqlx::query_as::<_, PaymentDetail>(&sql)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Amount / discount of every live payment, keyed by enrollment
pub async fn find_amounts(pool: &SqlitePool) -> RepoResult<Vec<PaymentAmount>> {
    let rows = sqlx::query_as::<_, PaymentAmount>(
        "SELECT enrollment_id, amount, discount FROM payment WHERE deleted = 0",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_amounts_by_student(
    pool: &SqlitePool,
    student_id: i64,
) -> RepoResult<Vec<PaymentAmount>> {
    let rows = sqlx::query_as::<_, PaymentAmount>(
        "SELECT p.enrollment_id, p.amount, p.discount FROM payment p JOIN enrollment e ON p.enrollment_id = e.id WHERE p.deleted = 0 AND e.student_id = ?",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: PaymentCreate) -> RepoResult<PaymentDetail> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO payment (id, enrollment_id, amount, discount, payment_method, payment_date, remarks, deleted, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?8)",
    )
    .bind(id)
    .bind(data.enrollment_id)
    .bind(data.amount)
    .bind(data.discount.unwrap_or(0.0))
    .bind(data.payment_method)
    .bind(&data.payment_date)
    .bind(data.remarks.as_deref().unwrap_or(""))
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create payment".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: PaymentUpdate) -> RepoResult<PaymentDetail> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE payment SET amount = COALESCE(?1, amount), discount = COALESCE(?2, discount), payment_method = COALESCE(?3, payment_method), payment_date = COALESCE(?4, payment_date), remarks = COALESCE(?5, remarks), updated_at = ?6 WHERE id = ?7 AND deleted = 0",
    )
    .bind(data.amount)
    .bind(data.discount)
    .bind(data.payment_method)
    .bind(&data.payment_date)
    .bind(&data.remarks)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Payment {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Payment {id} not found")))
}

/// Soft delete; false when the payment is unknown or already deleted
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE payment SET deleted = 1, updated_at = ? WHERE id = ? AND deleted = 0")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
