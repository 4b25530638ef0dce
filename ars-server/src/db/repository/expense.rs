//! Expense Repository

use super::{RepoError, RepoResult};
use shared::models::{Expense, ExpenseCreate, ExpenseUpdate};
use sqlx::SqlitePool;

const EXPENSE_SELECT: &str =
    "SELECT id, date, source, amount, bill_number, created_at, updated_at FROM expense";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Expense>> {
    let sql = format!("{EXPENSE_SELECT} ORDER BY date DESC, created_at DESC");
    let rows = sqlx::query_as::<_, Expense>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Expense>> {
    let sql = format!("{EXPENSE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Expense>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Every expense amount (for finance totals)
pub async fn find_amounts(pool: &SqlitePool) -> RepoResult<Vec<f64>> {
    let rows = sqlx::query_scalar::<_, f64>("SELECT amount FROM expense")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: ExpenseCreate) -> RepoResult<Expense> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO expense (id, date, source, amount, bill_number, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.date)
    .bind(data.source.trim())
    .bind(data.amount)
    .bind(&data.bill_number)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create expense".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ExpenseUpdate) -> RepoResult<Expense> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE expense SET date = COALESCE(?1, date), source = COALESCE(?2, source), amount = COALESCE(?3, amount), bill_number = COALESCE(?4, bill_number), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.date)
    .bind(data.source.as_deref().map(str::trim))
    .bind(data.amount)
    .bind(&data.bill_number)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Expense {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Expense {id} not found")))
}

/// Hard delete
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM expense WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
