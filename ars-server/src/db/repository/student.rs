//! Student Repository

use super::{RepoError, RepoResult};
use shared::models::{Student, StudentCreate, StudentUpdate};
use sqlx::{Sqlite, SqlitePool, Transaction};

const STUDENT_SELECT: &str = "SELECT id, name, email, phone, address, gender, shift, start_date, end_date, parents_name, parents_phone, education_level, deleted, created_at, updated_at FROM student";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Student>> {
    let sql = format!("{STUDENT_SELECT} WHERE deleted = 0 ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Student>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Student>> {
    let sql = format!("{STUDENT_SELECT} WHERE id = ? AND deleted = 0");
    let row = sqlx::query_as::<_, Student>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert the student and one enrollment per distinct course, atomically
///
/// Unknown or deleted course ids fail the whole insert.
pub async fn create(pool: &SqlitePool, data: StudentCreate) -> RepoResult<Student> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO student (id, name, email, phone, address, gender, shift, start_date, end_date, parents_name, parents_phone, education_level, deleted, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, 0, ?13, ?13)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.email.trim())
    .bind(&data.phone)
    .bind(&data.address)
    .bind(&data.gender)
    .bind(&data.shift)
    .bind(&data.start_date)
    .bind(&data.end_date)
    .bind(&data.parents_name)
    .bind(&data.parents_phone)
    .bind(&data.education_level)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    add_enrollments(&mut tx, id, &data.course_ids, now).await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create student".into()))
}

/// Patch the student; `course_ids` only adds enrollments that do not exist yet
pub async fn update(pool: &SqlitePool, id: i64, data: StudentUpdate) -> RepoResult<Student> {
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;
    let rows = sqlx::query(
        "UPDATE student SET name = COALESCE(?1, name), email = COALESCE(?2, email), phone = COALESCE(?3, phone), address = COALESCE(?4, address), gender = COALESCE(?5, gender), shift = COALESCE(?6, shift), start_date = COALESCE(?7, start_date), end_date = COALESCE(?8, end_date), parents_name = COALESCE(?9, parents_name), parents_phone = COALESCE(?10, parents_phone), education_level = COALESCE(?11, education_level), updated_at = ?12 WHERE id = ?13 AND deleted = 0",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.email.as_deref().map(str::trim))
    .bind(&data.phone)
    .bind(&data.address)
    .bind(&data.gender)
    .bind(&data.shift)
    .bind(&data.start_date)
    .bind(&data.end_date)
    .bind(&data.parents_name)
    .bind(&data.parents_phone)
    .bind(&data.education_level)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Student {id} not found")));
    }

    if let Some(course_ids) = &data.course_ids {
        add_enrollments(&mut tx, id, course_ids, now).await?;
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Student {id} not found")))
}

/// Soft delete; false when the student is unknown or already deleted
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE student SET deleted = 1, updated_at = ? WHERE id = ? AND deleted = 0")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Enroll a student in every course of `course_ids` they are not enrolled in yet
async fn add_enrollments(
    tx: &mut Transaction<'_, Sqlite>,
    student_id: i64,
    course_ids: &[i64],
    now: i64,
) -> RepoResult<()> {
    let mut seen = Vec::with_capacity(course_ids.len());
    for &course_id in course_ids {
        if seen.contains(&course_id) {
            continue;
        }
        seen.push(course_id);

        let live: Option<i64> =
            sqlx::query_scalar("SELECT id FROM course WHERE id = ? AND is_deleted = 0")
                .bind(course_id)
                .fetch_optional(&mut **tx)
                .await?;
        if live.is_none() {
            return Err(RepoError::Validation(format!("Course {course_id} does not exist")));
        }

        sqlx::query(
            "INSERT INTO enrollment (id, student_id, course_id, created_at) VALUES (?1, ?2, ?3, ?4) ON CONFLICT (student_id, course_id) DO NOTHING",
        )
        .bind(shared::util::snowflake_id())
        .bind(student_id)
        .bind(course_id)
        .bind(now)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
