//! Enrollment Repository

use super::{RepoError, RepoResult};
use shared::models::{Enrollment, EnrollmentDetail, StudentCourse};
use sqlx::SqlitePool;

const ENROLLMENT_DETAIL_SELECT: &str = "SELECT e.id, e.student_id, s.name AS student_name, e.course_id, c.name AS course_name, c.price AS course_price, e.created_at FROM enrollment e JOIN student s ON e.student_id = s.id JOIN course c ON e.course_id = c.id";

const STUDENT_COURSE_SELECT: &str = "SELECT e.id AS enrollment_id, e.student_id, c.id AS course_id, c.name, c.duration, c.price FROM enrollment e JOIN course c ON e.course_id = c.id JOIN student s ON e.student_id = s.id";

/// Enrollments of live students in live courses
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<EnrollmentDetail>> {
    let sql = format!(
        "{ENROLLMENT_DETAIL_SELECT} WHERE s.deleted = 0 AND c.is_deleted = 0 ORDER BY s.name COLLATE NOCASE, c.name COLLATE NOCASE"
    );
    let rows = sqlx::query_as::<_, EnrollmentDetail>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<EnrollmentDetail>> {
    let sql = format!(
        "{ENROLLMENT_DETAIL_SELECT} WHERE e.id = ? AND s.deleted = 0 AND c.is_deleted = 0"
    );
    let row = sqlx::query_as::<_, EnrollmentDetail>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_pair(
    pool: &SqlitePool,
    student_id: i64,
    course_id: i64,
) -> RepoResult<Option<Enrollment>> {
    let row = sqlx::query_as::<_, Enrollment>(
        "SELECT id, student_id, course_id, created_at FROM enrollment WHERE student_id = ? AND course_id = ?",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert an enrollment; the (student, course) pair must be new
pub async fn create(pool: &SqlitePool, student_id: i64, course_id: i64) -> RepoResult<EnrollmentDetail> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO enrollment (id, student_id, course_id, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(student_id)
        .bind(course_id)
        .bind(now)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create enrollment".into()))
}

/// Courses of every live student (deleted courses drop out)
pub async fn find_student_courses(pool: &SqlitePool) -> RepoResult<Vec<StudentCourse>> {
    let sql = format!(
        "{STUDENT_COURSE_SELECT} WHERE s.deleted = 0 AND c.is_deleted = 0 ORDER BY e.created_at"
    );
    let rows = sqlx::query_as::<_, StudentCourse>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_courses_by_student(
    pool: &SqlitePool,
    student_id: i64,
) -> RepoResult<Vec<StudentCourse>> {
    let sql = format!(
        "{STUDENT_COURSE_SELECT} WHERE e.student_id = ? AND s.deleted = 0 AND c.is_deleted = 0 ORDER BY e.created_at"
    );
    let rows = sqlx::query_as::<_, StudentCourse>(&sql)
        .bind(student_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
