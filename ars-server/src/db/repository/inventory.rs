//! Inventory Repository
//!
//! `restock_needed` is recomputed from the stock count on every stock write;
//! callers pass the configured threshold.

use super::{RepoError, RepoResult};
use shared::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use sqlx::SqlitePool;

const ITEM_SELECT: &str = "SELECT id, name, count_in_stock, category, restock_needed, created_at, updated_at FROM inventory_item";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<InventoryItem>> {
    let sql = format!("{ITEM_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, InventoryItem>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<InventoryItem>> {
    let sql = format!("{ITEM_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, InventoryItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    data: InventoryItemCreate,
    restock_threshold: i64,
) -> RepoResult<InventoryItem> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO inventory_item (id, name, count_in_stock, category, restock_needed, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.count_in_stock)
    .bind(data.category.as_deref().map(str::trim).filter(|c| !c.is_empty()))
    .bind(data.count_in_stock < restock_threshold)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create inventory item".into()))
}

/// Set the stock count and recompute the restock flag
pub async fn update_stock(
    pool: &SqlitePool,
    id: i64,
    count_in_stock: i64,
    restock_threshold: i64,
) -> RepoResult<InventoryItem> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory_item SET count_in_stock = ?1, restock_needed = ?2, updated_at = ?3 WHERE id = ?4",
    )
    .bind(count_in_stock)
    .bind(count_in_stock < restock_threshold)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Inventory item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))
}

pub async fn set_restock(pool: &SqlitePool, id: i64, restock_needed: bool) -> RepoResult<InventoryItem> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE inventory_item SET restock_needed = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(restock_needed)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Inventory item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))
}

/// Edit name / category; an empty category clears it
pub async fn update(pool: &SqlitePool, id: i64, data: InventoryItemUpdate) -> RepoResult<InventoryItem> {
    let now = shared::util::now_millis();
    let clear_category = data.category.as_deref().is_some_and(|c| c.trim().is_empty());
    let rows = sqlx::query(
        "UPDATE inventory_item SET name = COALESCE(?1, name), category = CASE WHEN ?2 THEN NULL ELSE COALESCE(?3, category) END, updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(clear_category)
    .bind(data.category.as_deref().map(str::trim))
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Inventory item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))
}

/// Hard delete
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM inventory_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
