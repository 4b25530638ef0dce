//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use super::RESOURCE;
use crate::api::students;
use crate::billing;
use crate::cache::{QueryKey, Versioned, patch, placeholder};
use crate::core::ServerState;
use crate::db::repository::{enrollment, payment};
use crate::utils::time::{normalize_date, normalize_optional_date, parse_date_range};
use crate::utils::validation::{
    MAX_NOTE_LEN, validate_non_negative_amount, validate_optional_text, validate_positive_amount,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{IncomePoint, PaymentCreate, PaymentDetail, PaymentTotals, PaymentUpdate};

#[derive(Debug, Deserialize)]
pub struct IncomeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::PaymentNotFound).with_detail("id", id)
}

async fn cached_list(state: &ServerState) -> AppResult<Versioned<Vec<PaymentDetail>>> {
    state
        .cache
        .get_or_load(&QueryKey::list(RESOURCE), || async {
            payment::find_all(&state.pool).await.map_err(AppError::from)
        })
        .await
}

fn validate_discount(discount: Option<f64>) -> AppResult<()> {
    match discount {
        Some(d) => validate_non_negative_amount(d, "discount", ErrorCode::PaymentInvalidDiscount),
        None => Ok(()),
    }
}

/// GET /api/payments - live payments, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Versioned<Vec<PaymentDetail>>> {
    cached_list(&state).await
}

/// GET /api/payments/totals - received, fully paid enrollments, outstanding
pub async fn totals(State(state): State<ServerState>) -> AppResult<Versioned<PaymentTotals>> {
    Ok(cached_list(&state)
        .await?
        .map(|payments| billing::payment_totals(&payments)))
}

/// GET /api/payments/income?start=&end= - daily income series
pub async fn income(
    State(state): State<ServerState>,
    Query(query): Query<IncomeQuery>,
) -> AppResult<Versioned<Vec<IncomePoint>>> {
    let start = normalize_optional_date(query.start.as_deref())?;
    let end = normalize_optional_date(query.end.as_deref())?;
    if let (Some(s), Some(e)) = (&start, &end) {
        parse_date_range(s, e)?;
    }

    Ok(cached_list(&state).await?.map(|payments| {
        billing::daily_income(&payments, start.as_deref(), end.as_deref())
    }))
}

/// GET /api/payments/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PaymentDetail>> {
    let payment = payment::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(payment))
}

/// POST /api/payments
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<PaymentCreate>,
) -> AppResult<Json<PaymentDetail>> {
    validate_positive_amount(payload.amount, "amount", ErrorCode::PaymentInvalidAmount)?;
    validate_discount(payload.discount)?;
    validate_optional_text(&payload.remarks, "remarks", MAX_NOTE_LEN)?;
    payload.payment_date = normalize_date(&payload.payment_date)?;

    let target = enrollment::find_by_id(&state.pool, payload.enrollment_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::EnrollmentNotFound).with_detail("id", payload.enrollment_id)
        })?;

    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| {
            patch::prepend(list, placeholder::payment(&payload, &target))
        });

    let created = payment::create(&state.pool, payload).await?;

    guard.commit();
    state.cache.invalidate_resource(students::RESOURCE);
    tracing::info!(
        id = created.id,
        enrollment_id = created.enrollment_id,
        amount = created.amount,
        method = ?created.payment_method,
        "Payment recorded"
    );
    Ok(Json(created))
}

/// PUT /api/payments/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<PaymentUpdate>,
) -> AppResult<Json<PaymentDetail>> {
    if let Some(amount) = payload.amount {
        validate_positive_amount(amount, "amount", ErrorCode::PaymentInvalidAmount)?;
    }
    validate_discount(payload.discount)?;
    validate_optional_text(&payload.remarks, "remarks", MAX_NOTE_LEN)?;
    payload.payment_date = normalize_optional_date(payload.payment_date.as_deref())?;

    payment::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| {
            patch::merge_by_id(list, id, &payload)
        });

    let updated = payment::update(&state.pool, id, payload).await?;

    guard.commit();
    state.cache.invalidate_resource(students::RESOURCE);
    tracing::info!(id, "Payment updated");
    Ok(Json(updated))
}

/// DELETE /api/payments/{id} - soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| patch::remove_by_id(list, id));

    if !payment::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    guard.commit();
    state.cache.invalidate_resource(students::RESOURCE);
    tracing::info!(id, "Payment deleted");
    Ok(Json(true))
}
