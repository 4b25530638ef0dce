//! Inventory filtering and counters
//!
//! The item list is small and cached whole; filters run in memory.

use std::collections::BTreeSet;

use shared::models::{InventoryFilter, InventoryItem, InventoryStats};

/// Items matching `filter`, keeping input order
///
/// `search` matches name or category (case-insensitive); `category` must
/// match exactly unless it is `all`.
pub fn filter_items(
    items: Vec<InventoryItem>,
    filter: &InventoryFilter,
    restock_threshold: i64,
) -> Vec<InventoryItem> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let category = filter
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));

    items
        .into_iter()
        .filter(|item| {
            needle.as_ref().is_none_or(|n| {
                item.name.to_lowercase().contains(n.as_str())
                    || item
                        .category
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(n.as_str()))
            })
        })
        .filter(|item| category.is_none_or(|c| item.category.as_deref() == Some(c)))
        .filter(|item| filter.status.matches(item, restock_threshold))
        .collect()
}

/// Counters for the inventory header
pub fn stats(items: &[InventoryItem]) -> InventoryStats {
    let categories: BTreeSet<&str> = items
        .iter()
        .filter_map(|i| i.category.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();

    InventoryStats {
        total_items: items.len() as i64,
        out_of_stock: items.iter().filter(|i| i.count_in_stock == 0).count() as i64,
        needs_restock: items.iter().filter(|i| i.restock_needed).count() as i64,
        categories: categories.into_iter().map(String::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::StockStatus;

    fn item(id: i64, name: &str, count: i64, category: Option<&str>, restock: bool) -> InventoryItem {
        InventoryItem {
            id,
            name: name.into(),
            count_in_stock: count,
            category: category.map(String::from),
            restock_needed: restock,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn items() -> Vec<InventoryItem> {
        vec![
            item(1, "Sewing needle", 40, Some("Tailoring"), false),
            item(2, "Thread spool", 3, Some("Tailoring"), true),
            item(3, "Hair dryer", 0, Some("Beautician"), true),
            item(4, "Whiteboard marker", 12, None, true),
        ]
    }

    fn ids(items: &[InventoryItem]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_filter_by_search_matches_name_or_category() {
        let filter = InventoryFilter {
            search: Some("TAILOR".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_items(items(), &filter, 5)), [1, 2]);

        let filter = InventoryFilter {
            search: Some("marker".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_items(items(), &filter, 5)), [4]);
    }

    #[test]
    fn test_filter_by_category_and_status() {
        let filter = InventoryFilter {
            category: Some("Tailoring".into()),
            status: StockStatus::LowStock,
            ..Default::default()
        };
        assert_eq!(ids(&filter_items(items(), &filter, 5)), [2]);

        let filter = InventoryFilter {
            category: Some("all".into()),
            status: StockStatus::OutOfStock,
            ..Default::default()
        };
        assert_eq!(ids(&filter_items(items(), &filter, 5)), [3]);

        let filter = InventoryFilter {
            status: StockStatus::NeedsRestock,
            ..Default::default()
        };
        assert_eq!(ids(&filter_items(items(), &filter, 5)), [2, 3, 4]);
    }

    #[test]
    fn test_stats() {
        let stats = stats(&items());
        assert_eq!(stats.total_items, 4);
        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(stats.needs_restock, 3);
        assert_eq!(stats.categories, ["Beautician", "Tailoring"]);
    }
}
