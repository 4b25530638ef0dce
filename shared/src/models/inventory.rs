//! Inventory Model

use serde::{Deserialize, Serialize};

/// Stock count below which an item is flagged for restocking
pub const DEFAULT_RESTOCK_THRESHOLD: i64 = 5;

/// Inventory item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub count_in_stock: i64,
    pub category: Option<String>,
    /// Recomputed whenever the stock count is written; can be toggled by hand
    pub restock_needed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub count_in_stock: i64,
    pub category: Option<String>,
}

/// Edit item payload (name / category only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
}

/// Stock count update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUpdate {
    pub count_in_stock: i64,
}

/// Restock flag toggle payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestockUpdate {
    pub restock_needed: bool,
}

/// Stock status filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    #[default]
    All,
    InStock,
    LowStock,
    OutOfStock,
    NeedsRestock,
}

impl StockStatus {
    /// Whether an item matches this filter, given the restock threshold
    pub fn matches(self, item: &InventoryItem, threshold: i64) -> bool {
        let count = item.count_in_stock;
        match self {
            StockStatus::All => true,
            StockStatus::InStock => count >= threshold,
            StockStatus::LowStock => count > 0 && count < threshold,
            StockStatus::OutOfStock => count == 0,
            StockStatus::NeedsRestock => item.restock_needed,
        }
    }
}

/// List query for inventory items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryFilter {
    pub search: Option<String>,
    /// Exact category; `all` or absent means any
    pub category: Option<String>,
    #[serde(default)]
    pub status: StockStatus,
}

/// Inventory overview counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total_items: i64,
    pub out_of_stock: i64,
    pub needs_restock: i64,
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(count: i64, restock_needed: bool) -> InventoryItem {
        InventoryItem {
            id: 1,
            name: "Marker".into(),
            count_in_stock: count,
            category: None,
            restock_needed,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_stock_status_matches() {
        let t = DEFAULT_RESTOCK_THRESHOLD;
        assert!(StockStatus::InStock.matches(&item(5, false), t));
        assert!(!StockStatus::InStock.matches(&item(4, false), t));
        assert!(StockStatus::LowStock.matches(&item(4, false), t));
        assert!(!StockStatus::LowStock.matches(&item(0, false), t));
        assert!(StockStatus::OutOfStock.matches(&item(0, false), t));
        assert!(StockStatus::NeedsRestock.matches(&item(50, true), t));
        assert!(StockStatus::All.matches(&item(0, false), t));
    }

    #[test]
    fn test_stock_status_serde() {
        let s: StockStatus = serde_json::from_str("\"out-of-stock\"").unwrap();
        assert_eq!(s, StockStatus::OutOfStock);
        assert_eq!(serde_json::to_string(&StockStatus::NeedsRestock).unwrap(), "\"needs-restock\"");
    }
}
