//! Student API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use sqlx::SqlitePool;

use super::RESOURCE;
use crate::api::{enrollments, payments};
use crate::billing;
use crate::cache::{QueryKey, Versioned, patch, placeholder};
use crate::core::ServerState;
use crate::db::repository::{enrollment, payment, student};
use crate::utils::time::normalize_optional_date;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    PaymentOverview, PaymentStatus, Student, StudentCreate, StudentUpdate, StudentWithFees,
};

#[derive(Debug, Deserialize)]
pub struct OverviewQuery {
    pub search: Option<String>,
    /// Paid | Partial | Due | all
    pub status: Option<String>,
}

/// Every live student with courses and fee summary
async fn load_students(pool: &SqlitePool) -> AppResult<Vec<StudentWithFees>> {
    let students = student::find_all(pool).await?;
    let courses = enrollment::find_student_courses(pool).await?;
    let payments = payment::find_amounts(pool).await?;
    Ok(billing::build_students(students, courses, &payments))
}

async fn with_fees(pool: &SqlitePool, student: Student) -> AppResult<StudentWithFees> {
    let courses = enrollment::find_courses_by_student(pool, student.id).await?;
    let payments = payment::find_amounts_by_student(pool, student.id).await?;
    let fees = billing::fee_summary(&courses, &payments);
    Ok(StudentWithFees {
        student,
        courses,
        fees,
    })
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::StudentNotFound).with_detail("id", id)
}

/// GET /api/students - all students with fee summaries
pub async fn list(State(state): State<ServerState>) -> AppResult<Versioned<Vec<StudentWithFees>>> {
    state
        .cache
        .get_or_load(&QueryKey::list(RESOURCE), || load_students(&state.pool))
        .await
}

/// GET /api/students/overview?search=&status= - enrolled students by payment status
pub async fn overview(
    State(state): State<ServerState>,
    Query(query): Query<OverviewQuery>,
) -> AppResult<Versioned<PaymentOverview>> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) if s.eq_ignore_ascii_case("all") => None,
        Some(s) => Some(s.parse::<PaymentStatus>().map_err(AppError::validation)?),
    };

    let students = state
        .cache
        .get_or_load(&QueryKey::list(RESOURCE), || load_students(&state.pool))
        .await?;

    Ok(students.map(|students| {
        let stats = billing::payment_stats(&students);
        let students = billing::payment_overview(students, query.search.as_deref(), status);
        PaymentOverview { stats, students }
    }))
}

/// GET /api/students/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StudentWithFees>> {
    let student = student::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(with_fees(&state.pool, student).await?))
}

fn validate_common(
    phone: &Option<String>,
    address: &Option<String>,
    gender: &Option<String>,
    shift: &Option<String>,
    parents_name: &Option<String>,
    parents_phone: &Option<String>,
    education_level: &Option<String>,
) -> AppResult<()> {
    validate_optional_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(gender, "gender", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(shift, "shift", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(parents_name, "parents_name", MAX_NAME_LEN)?;
    validate_optional_text(parents_phone, "parents_phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(education_level, "education_level", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

/// POST /api/students - create a student and enroll them in `course_ids`
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<StudentCreate>,
) -> AppResult<Json<StudentWithFees>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    validate_common(
        &payload.phone,
        &payload.address,
        &payload.gender,
        &payload.shift,
        &payload.parents_name,
        &payload.parents_phone,
        &payload.education_level,
    )?;
    payload.start_date = normalize_optional_date(payload.start_date.as_deref())?;
    payload.end_date = normalize_optional_date(payload.end_date.as_deref())?;

    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| {
            patch::prepend(list, placeholder::student(&payload))
        });

    let created = student::create(&state.pool, payload).await?;
    let created = with_fees(&state.pool, created).await?;

    guard.commit();
    state.cache.invalidate_resource(enrollments::RESOURCE);
    tracing::info!(id = created.student.id, name = %created.student.name, "Student created");

    Ok(Json(created))
}

/// PUT /api/students/{id} - patch; `course_ids` only adds enrollments
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<StudentUpdate>,
) -> AppResult<Json<StudentWithFees>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.email {
        validate_email(email)?;
    }
    validate_common(
        &payload.phone,
        &payload.address,
        &payload.gender,
        &payload.shift,
        &payload.parents_name,
        &payload.parents_phone,
        &payload.education_level,
    )?;
    payload.start_date = normalize_optional_date(payload.start_date.as_deref())?;
    payload.end_date = normalize_optional_date(payload.end_date.as_deref())?;

    student::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let mut changes = serde_json::to_value(&payload).unwrap_or_default();
    if let Some(fields) = changes.as_object_mut() {
        fields.remove("course_ids");
    }
    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| {
            patch::merge_by_id(list, id, &changes)
        });

    let updated = student::update(&state.pool, id, payload).await?;
    let updated = with_fees(&state.pool, updated).await?;

    guard.commit();
    state.cache.invalidate_resource(enrollments::RESOURCE);
    state.cache.invalidate_resource(payments::RESOURCE);
    tracing::info!(id, "Student updated");

    Ok(Json(updated))
}

/// DELETE /api/students/{id} - soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| patch::remove_by_id(list, id));

    if !student::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    guard.commit();
    state.cache.invalidate_resource(enrollments::RESOURCE);
    state.cache.invalidate_resource(payments::RESOURCE);
    tracing::info!(id, "Student deleted");

    Ok(Json(true))
}
