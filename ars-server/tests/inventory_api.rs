mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::json;
use shared::models::{InventoryItem, InventoryStats};

async fn add(app: &TestApp, name: &str, count: i64, category: Option<&str>) -> InventoryItem {
    let res = app
        .post(
            "/api/inventory",
            json!({"name": name, "count_in_stock": count, "category": category}),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    res.json()
}

#[tokio::test]
async fn test_restock_flag_follows_stock_writes() {
    let app = TestApp::new().await;
    let item = add(&app, "Thread spool", 3, Some("Tailoring")).await;
    assert!(item.restock_needed);

    let res = app
        .put(&format!("/api/inventory/{}/stock", item.id), json!({"count_in_stock": 20}))
        .await;
    let item: InventoryItem = res.json();
    assert_eq!(item.count_in_stock, 20);
    assert!(!item.restock_needed);

    // Manual toggle sticks until the next stock write
    let res = app
        .put(&format!("/api/inventory/{}/restock", item.id), json!({"restock_needed": true}))
        .await;
    let item: InventoryItem = res.json();
    assert!(item.restock_needed);

    let res = app
        .put(&format!("/api/inventory/{}/stock", item.id), json!({"count_in_stock": 5}))
        .await;
    let item: InventoryItem = res.json();
    assert!(!item.restock_needed);

    let res = app
        .put(&format!("/api/inventory/{}/stock", item.id), json!({"count_in_stock": -1}))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.code(), 7002);
}

#[tokio::test]
async fn test_filters_and_stats() {
    let app = TestApp::new().await;
    add(&app, "Sewing needle", 40, Some("Tailoring")).await;
    add(&app, "Thread spool", 3, Some("Tailoring")).await;
    add(&app, "Hair dryer", 0, Some("Beautician")).await;
    add(&app, "Whiteboard marker", 12, None).await;

    let items: Vec<InventoryItem> = app.get("/api/inventory").await.json();
    assert_eq!(items.len(), 4);

    let items: Vec<InventoryItem> = app.get("/api/inventory?status=low-stock").await.json();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Thread spool");

    let items: Vec<InventoryItem> = app
        .get("/api/inventory?search=tailor&status=in-stock")
        .await
        .json();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Sewing needle");

    let items: Vec<InventoryItem> = app
        .get("/api/inventory?category=Beautician&status=out-of-stock")
        .await
        .json();
    assert_eq!(items.len(), 1);

    let stats: InventoryStats = app.get("/api/inventory/stats").await.json();
    assert_eq!(stats.total_items, 4);
    assert_eq!(stats.out_of_stock, 1);
    assert_eq!(stats.needs_restock, 2);
    assert_eq!(stats.categories, ["Beautician", "Tailoring"]);
}

#[tokio::test]
async fn test_edit_and_delete_item() {
    let app = TestApp::new().await;
    let item = add(&app, "Scissors", 8, Some("Tailoring")).await;

    let res = app
        .put(&format!("/api/inventory/{}", item.id), json!({"name": "Fabric scissors", "category": ""}))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let edited: InventoryItem = res.json();
    assert_eq!(edited.name, "Fabric scissors");
    assert_eq!(edited.category, None);
    assert_eq!(edited.count_in_stock, 8);

    let res = app.delete(&format!("/api/inventory/{}", item.id)).await;
    assert_eq!(res.status, StatusCode::OK);
    let res = app.delete(&format!("/api/inventory/{}", item.id)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.code(), 7001);

    let res = app
        .put("/api/inventory/999/stock", json!({"count_in_stock": 1}))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
