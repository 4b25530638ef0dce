//! Enrollment API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use super::RESOURCE;
use crate::api::students;
use crate::cache::{QueryKey, Versioned, patch, placeholder};
use crate::core::ServerState;
use crate::db::repository::{RepoError, course, enrollment, student};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{EnrollmentCreate, EnrollmentDetail};

fn already_enrolled(data: &EnrollmentCreate) -> AppError {
    AppError::new(ErrorCode::AlreadyEnrolled)
        .with_detail("student_id", data.student_id)
        .with_detail("course_id", data.course_id)
}

/// GET /api/enrollments - enrollments with student and course names
pub async fn list(State(state): State<ServerState>) -> AppResult<Versioned<Vec<EnrollmentDetail>>> {
    state
        .cache
        .get_or_load(&QueryKey::list(RESOURCE), || async {
            enrollment::find_all(&state.pool).await.map_err(AppError::from)
        })
        .await
}

/// GET /api/enrollments/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EnrollmentDetail>> {
    let enrollment = enrollment::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EnrollmentNotFound).with_detail("id", id))?;
    Ok(Json(enrollment))
}

/// POST /api/enrollments - enroll a student in a course
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EnrollmentCreate>,
) -> AppResult<Json<EnrollmentDetail>> {
    let student = student::find_by_id(&state.pool, payload.student_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::StudentNotFound).with_detail("id", payload.student_id)
        })?;
    let course = course::find_by_id(&state.pool, payload.course_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::CourseNotFound).with_detail("id", payload.course_id)
        })?;
    if enrollment::find_by_pair(&state.pool, payload.student_id, payload.course_id)
        .await?
        .is_some()
    {
        return Err(already_enrolled(&payload));
    }

    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| {
            let pending = placeholder::enrollment(student.id, &student.name, &course);
            patch::append(list, pending)
        });

    let created = match enrollment::create(&state.pool, payload.student_id, payload.course_id).await {
        Ok(created) => created,
        // Lost a race with a concurrent enroll
        Err(RepoError::Duplicate(_)) => return Err(already_enrolled(&payload)),
        Err(e) => return Err(e.into()),
    };

    guard.commit();
    state.cache.invalidate_resource(students::RESOURCE);
    tracing::info!(
        id = created.id,
        student_id = created.student_id,
        course_id = created.course_id,
        "Student enrolled"
    );
    Ok(Json(created))
}
