//! Integration tests for the file backend.
//!
//! These tests poke at the files directly to check the stored format and the
//! empty-on-corruption read policy.

#![allow(clippy::unwrap_used)]

use zenplay_core::{Order, Price};
use zenplay_integration_tests::{TestContext, checkout_form, product};

fn cart_file(ctx: &TestContext) -> std::path::PathBuf {
    ctx.data_dir().join("zenplay_cart.json")
}

fn orders_file(ctx: &TestContext) -> std::path::PathBuf {
    ctx.data_dir().join("zenplay_orders.json")
}

// =============================================================================
// Reopen
// =============================================================================

#[test]
fn test_cart_survives_reopen() {
    let ctx = TestContext::new();
    {
        let storefront = ctx.storefront();
        storefront
            .cart()
            .add_item(product("p1", "Bamboo yoga mat", 1000))
            .unwrap();
        storefront
            .cart()
            .add_item(product("p1", "Bamboo yoga mat", 1000))
            .unwrap();
    }

    let summary = ctx.storefront().cart().summary();
    assert_eq!(summary.item_count, 2);
    assert_eq!(summary.total, Price::from_cents(2000).unwrap());
}

#[test]
fn test_orders_reload_deep_equal() {
    let ctx = TestContext::new();
    let storefront = ctx.storefront();
    storefront
        .cart()
        .add_item(product("p1", "Singing bowl", 2599))
        .unwrap();
    let order = storefront
        .checkout()
        .place_order(checkout_form("jane@example.com"))
        .unwrap();

    let raw = std::fs::read_to_string(orders_file(&ctx)).unwrap();
    let reloaded: Vec<Order> = serde_json::from_str(&raw).unwrap();
    assert_eq!(reloaded, vec![order.clone()]);
    assert_eq!(ctx.admin().orders().find(&order.id), Some(order));
}

// =============================================================================
// Stored format
// =============================================================================

#[test]
fn test_order_file_uses_storefront_field_names() {
    let ctx = TestContext::new();
    let storefront = ctx.storefront();
    storefront
        .cart()
        .add_item(product("p1", "Singing bowl", 2599))
        .unwrap();
    storefront
        .checkout()
        .place_order(checkout_form("jane@example.com"))
        .unwrap();

    let raw = std::fs::read_to_string(orders_file(&ctx)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let order = &value[0];
    assert_eq!(order["status"], "Pending");
    assert_eq!(order["customer"]["firstName"], "Jane");
    assert_eq!(order["customer"]["notes"], "Call on arrival");
    assert_eq!(order["items"][0]["quantity"], 1);
    assert_eq!(order["total"].as_f64(), Some(25.99));
}

#[test]
fn test_hand_written_orders_are_readable() {
    let ctx = TestContext::new();
    std::fs::write(
        orders_file(&ctx),
        r#"[{"id":"o1","customer":{"firstName":"Ann","lastName":"Njeri","email":"ann@example.com","phone":"1","address":"A","city":"B"},"date":"2024-01-01 09:00","status":"Processed","items":[{"name":"Mat","quantity":2,"price":10}],"total":20}]"#,
    )
    .unwrap();

    let admin = ctx.admin();
    let stats = admin.stats();
    assert_eq!(stats.total_orders, 1);
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.revenue, Price::from_cents(2000).unwrap());
}

#[test]
fn test_corrupt_files_read_as_empty() {
    let ctx = TestContext::new();
    std::fs::write(cart_file(&ctx), "[{\"id\":").unwrap();
    std::fs::write(orders_file(&ctx), "not json").unwrap();

    assert!(ctx.storefront().cart().get_cart().is_empty());
    assert!(ctx.admin().orders().get_orders().is_empty());
}

#[test]
fn test_unknown_status_makes_collection_unreadable() {
    let ctx = TestContext::new();
    std::fs::write(
        orders_file(&ctx),
        r#"[{"id":"o1","customer":{"firstName":"Ann","lastName":"Njeri","email":"ann@example.com","phone":"1","address":"A","city":"B"},"date":"2024-01-01 09:00","status":"pending","items":[],"total":0}]"#,
    )
    .unwrap();

    assert!(ctx.admin().orders().get_orders().is_empty());
}

#[test]
fn test_writing_after_corruption_replaces_file() {
    let ctx = TestContext::new();
    std::fs::write(cart_file(&ctx), "garbage").unwrap();

    let storefront = ctx.storefront();
    storefront
        .cart()
        .add_item(product("p1", "Bamboo yoga mat", 1000))
        .unwrap();

    let raw = std::fs::read_to_string(cart_file(&ctx)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(1));

    let backup = ctx.data_dir().join("zenplay_cart_backup.json");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), "garbage");
}

#[test]
fn test_rejected_orders_are_backed_up_before_checkout_overwrites_them() {
    let ctx = TestContext::new();
    let legacy = r#"[{"id":"o1","customer":{"firstName":"Ann","lastName":"Njeri","email":"ann@example.com","phone":"1","address":"A","city":"B"},"date":"2024-01-01 09:00","status":"pending","items":[],"total":0}]"#;
    std::fs::write(orders_file(&ctx), legacy).unwrap();

    let storefront = ctx.storefront();
    storefront
        .cart()
        .add_item(product("p1", "Bamboo yoga mat", 1000))
        .unwrap();
    storefront.checkout().place_order(checkout_form("ann@example.com")).unwrap();

    assert_eq!(ctx.admin().orders().get_orders().len(), 1);
    let backup = ctx.data_dir().join("zenplay_orders_backup.json");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), legacy);
}
