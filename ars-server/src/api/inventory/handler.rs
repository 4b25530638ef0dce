//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use super::RESOURCE;
use crate::cache::{QueryKey, Versioned, patch, placeholder};
use crate::core::ServerState;
use crate::db::repository::{RepoError, inventory};
use crate::stock;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    InventoryFilter, InventoryItem, InventoryItemCreate, InventoryItemUpdate, InventoryStats,
    RestockUpdate, StockUpdate,
};

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::InventoryItemNotFound).with_detail("id", id)
}

fn validate_stock(count: i64) -> AppResult<()> {
    if count < 0 {
        return Err(AppError::with_message(
            ErrorCode::InventoryInvalidStock,
            format!("Stock count must not be negative, got {count}"),
        ));
    }
    Ok(())
}

async fn cached_items(state: &ServerState) -> AppResult<Versioned<Vec<InventoryItem>>> {
    state
        .cache
        .get_or_load(&QueryKey::list(RESOURCE), || async {
            inventory::find_all(&state.pool).await.map_err(AppError::from)
        })
        .await
}

/// GET /api/inventory?search=&category=&status= - newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<InventoryFilter>,
) -> AppResult<Versioned<Vec<InventoryItem>>> {
    let threshold = state.restock_threshold();
    Ok(cached_items(&state)
        .await?
        .map(|items| stock::filter_items(items, &filter, threshold)))
}

/// GET /api/inventory/stats
pub async fn stats(State(state): State<ServerState>) -> AppResult<Versioned<InventoryStats>> {
    Ok(cached_items(&state).await?.map(|items| stock::stats(&items)))
}

/// GET /api/inventory/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<InventoryItem>> {
    let item = inventory::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// POST /api/inventory - restock flag derived from the count
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InventoryItemCreate>,
) -> AppResult<Json<InventoryItem>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_stock(payload.count_in_stock)?;

    let threshold = state.restock_threshold();
    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| {
            patch::prepend(list, placeholder::inventory_item(&payload, threshold))
        });

    let item = inventory::create(&state.pool, payload, threshold).await?;

    guard.commit();
    tracing::info!(id = item.id, name = %item.name, count = item.count_in_stock, "Inventory item added");
    Ok(Json(item))
}

/// PUT /api/inventory/{id} - edit name / category
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<InventoryItemUpdate>,
) -> AppResult<Json<InventoryItem>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;

    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| {
            patch::merge_by_id(list, id, &payload)
        });

    let item = inventory::update(&state.pool, id, payload)
        .await
        .map_err(|e| not_found_or(e, id))?;

    guard.commit();
    tracing::info!(id, "Inventory item edited");
    Ok(Json(item))
}

/// PUT /api/inventory/{id}/stock - set count, recompute restock flag
pub async fn update_stock(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StockUpdate>,
) -> AppResult<Json<InventoryItem>> {
    validate_stock(payload.count_in_stock)?;
    let threshold = state.restock_threshold();

    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| {
            patch::merge_by_id(
                list,
                id,
                serde_json::json!({
                    "count_in_stock": payload.count_in_stock,
                    "restock_needed": payload.count_in_stock < threshold,
                }),
            )
        });

    let item = inventory::update_stock(&state.pool, id, payload.count_in_stock, threshold)
        .await
        .map_err(|e| not_found_or(e, id))?;

    guard.commit();
    tracing::info!(id, count = item.count_in_stock, restock_needed = item.restock_needed, "Stock updated");
    Ok(Json(item))
}

/// PUT /api/inventory/{id}/restock - set the restock flag by hand
pub async fn toggle_restock(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RestockUpdate>,
) -> AppResult<Json<InventoryItem>> {
    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| {
            patch::merge_by_id(list, id, &payload)
        });

    let item = inventory::set_restock(&state.pool, id, payload.restock_needed)
        .await
        .map_err(|e| not_found_or(e, id))?;

    guard.commit();
    tracing::info!(id, restock_needed = item.restock_needed, "Restock flag set");
    Ok(Json(item))
}

/// DELETE /api/inventory/{id} - permanent
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let guard = state
        .cache
        .optimistic(&QueryKey::list(RESOURCE), |list| patch::remove_by_id(list, id));

    if !inventory::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    guard.commit();
    tracing::info!(id, "Inventory item deleted");
    Ok(Json(true))
}

fn not_found_or(err: RepoError, id: i64) -> AppError {
    match err {
        RepoError::NotFound(_) => not_found(id),
        other => other.into(),
    }
}
