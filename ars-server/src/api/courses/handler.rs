//! Course API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use super::RESOURCE;
use crate::api::{enrollments, payments, students};
use crate::cache::{QueryKey, Versioned, patch, placeholder};
use crate::core::ServerState;
use crate::db::repository::course;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative_amount,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Course, CourseCreate, CourseUpdate};

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::CourseNotFound).with_detail("id", id)
}

fn validate_price(price: Option<f64>) -> AppResult<()> {
    match price {
        Some(p) => validate_non_negative_amount(p, "price", ErrorCode::CourseInvalidPrice),
        None => Ok(()),
    }
}

/// Course changes show up in fee totals, enrollment and payment lists
fn invalidate_dependents(state: &ServerState) {
    state.cache.invalidate_resource(students::RESOURCE);
    state.cache.invalidate_resource(enrollments::RESOURCE);
    state.cache.invalidate_resource(payments::RESOURCE);
}

/// GET /api/courses - live courses by name
pub async fn list(State(state): State<ServerState>) -> AppResult<Versioned<Vec<Course>>> {
    state
        .cache
        .get_or_load(&QueryKey::list(RESOURCE), || async {
            course::find_all(&state.pool).await.map_err(AppError::from)
        })
        .await
}

/// GET /api/courses/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Course>> {
    let course = course::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(course))
}

/// POST /api/courses
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CourseCreate>,
) -> AppResult<Json<Course>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.duration, "duration", MAX_SHORT_TEXT_LEN)?;
    validate_price(payload.price)?;

    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| {
            patch::append(list, placeholder::course(&payload))
        });

    let course = course::create(&state.pool, payload).await?;

    guard.commit();
    tracing::info!(id = course.id, name = %course.name, "Course created");
    Ok(Json(course))
}

/// PUT /api/courses/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CourseUpdate>,
) -> AppResult<Json<Course>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.duration, "duration", MAX_SHORT_TEXT_LEN)?;
    validate_price(payload.price)?;

    course::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| {
            patch::merge_by_id(list, id, &payload)
        });

    let course = course::update(&state.pool, id, payload).await?;

    guard.commit();
    invalidate_dependents(&state);
    tracing::info!(id, "Course updated");
    Ok(Json(course))
}

/// DELETE /api/courses/{id} - soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| patch::remove_by_id(list, id));

    if !course::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    guard.commit();
    invalidate_dependents(&state);
    tracing::info!(id, "Course deleted");
    Ok(Json(true))
}
