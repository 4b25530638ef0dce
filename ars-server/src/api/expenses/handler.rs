//! Expense API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use super::RESOURCE;
use crate::cache::{QueryKey, Versioned, patch, placeholder};
use crate::core::ServerState;
use crate::db::repository::expense;
use crate::utils::time::{normalize_date, normalize_optional_date};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_positive_amount,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Expense, ExpenseCreate, ExpenseUpdate};

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::ExpenseNotFound).with_detail("id", id)
}

/// GET /api/expenses - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Versioned<Vec<Expense>>> {
    state
        .cache
        .get_or_load(&QueryKey::list(RESOURCE), || async {
            expense::find_all(&state.pool).await.map_err(AppError::from)
        })
        .await
}

/// GET /api/expenses/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Expense>> {
    let expense = expense::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(expense))
}

/// POST /api/expenses
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<ExpenseCreate>,
) -> AppResult<Json<Expense>> {
    validate_required_text(&payload.source, "source", MAX_NAME_LEN)?;
    validate_positive_amount(payload.amount, "amount", ErrorCode::ExpenseInvalidAmount)?;
    validate_optional_text(&payload.bill_number, "bill_number", MAX_SHORT_TEXT_LEN)?;
    payload.date = normalize_date(&payload.date)?;

    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| {
            patch::prepend(list, placeholder::expense(&payload))
        });

    let created = expense::create(&state.pool, payload).await?;

    guard.commit();
    tracing::info!(id = created.id, amount = created.amount, source = %created.source, "Expense recorded");
    Ok(Json(created))
}

/// PUT /api/expenses/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<ExpenseUpdate>,
) -> AppResult<Json<Expense>> {
    if let Some(source) = &payload.source {
        validate_required_text(source, "source", MAX_NAME_LEN)?;
    }
    if let Some(amount) = payload.amount {
        validate_positive_amount(amount, "amount", ErrorCode::ExpenseInvalidAmount)?;
    }
    validate_optional_text(&payload.bill_number, "bill_number", MAX_SHORT_TEXT_LEN)?;
    payload.date = normalize_optional_date(payload.date.as_deref())?;

    expense::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| {
            patch::merge_by_id(list, id, &payload)
        });

    let updated = expense::update(&state.pool, id, payload).await?;

    guard.commit();
    tracing::info!(id, "Expense updated");
    Ok(Json(updated))
}

/// DELETE /api/expenses/{id} - permanent
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| patch::remove_by_id(list, id));

    if !expense::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    guard.commit();
    tracing::info!(id, "Expense deleted");
    Ok(Json(true))
}
