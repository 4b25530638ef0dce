//! Course Repository

use super::{RepoError, RepoResult};
use shared::models::{Course, CourseCreate, CourseUpdate};
use sqlx::SqlitePool;

const COURSE_SELECT: &str = "SELECT id, name, description, duration, price, is_deleted, created_at, updated_at FROM course";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Course>> {
    let sql = format!("{COURSE_SELECT} WHERE is_deleted = 0 ORDER BY name COLLATE NOCASE");
    let rows = sqlx::query_as::<_, Course>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Course>> {
    let sql = format!("{COURSE_SELECT} WHERE id = ? AND is_deleted = 0");
    let row = sqlx::query_as::<_, Course>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: CourseCreate) -> RepoResult<Course> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO course (id, name, description, duration, price, is_deleted, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?6)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(&data.description)
    .bind(&data.duration)
    .bind(data.price)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create course".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CourseUpdate) -> RepoResult<Course> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE course SET name = COALESCE(?1, name), description = COALESCE(?2, description), duration = COALESCE(?3, duration), price = COALESCE(?4, price), updated_at = ?5 WHERE id = ?6 AND is_deleted = 0",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(&data.description)
    .bind(&data.duration)
    .bind(data.price)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Course {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Course {id} not found")))
}

/// Soft delete; false when the course is unknown or already deleted
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE course SET is_deleted = 1, updated_at = ? WHERE id = ? AND is_deleted = 0",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
