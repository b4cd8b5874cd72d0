//! Integration tests for the cart to checkout to dashboard flow.
//!
//! The storefront and the admin side are opened separately over one data
//! directory, the way two processes would share it.

#![allow(clippy::unwrap_used)]

use zenplay_admin::{AlwaysConfirm, NeverConfirm, OrderChange};
use zenplay_core::{OrderStatus, Price, ProductId};
use zenplay_integration_tests::{TestContext, checkout_form, product};
use zenplay_storefront::CheckoutError;

// =============================================================================
// Checkout
// =============================================================================

#[test]
fn test_checkout_appends_pending_order_and_clears_cart() {
    let ctx = TestContext::new();
    let storefront = ctx.storefront();
    let cart = storefront.cart();

    cart.add_item(product("p1", "Bamboo yoga mat", 4999)).unwrap();
    cart.add_item(product("p1", "Bamboo yoga mat", 4999)).unwrap();
    cart.add_item(product("p2", "Incense set", 850)).unwrap();
    assert_eq!(cart.summary().item_count, 3);

    let order = storefront
        .checkout()
        .place_order(checkout_form("jane@example.com"))
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, Price::from_cents(10848).unwrap());
    assert!(cart.get_cart().is_empty());

    let admin = ctx.admin();
    let orders = admin.orders().get_orders();
    assert_eq!(orders, vec![order.clone()]);

    let detail = admin.order_detail(&order.id).unwrap();
    assert_eq!(detail.customer_name, "Jane Wanjiru");
    assert_eq!(detail.notes, "Call on arrival");
    assert_eq!(detail.items.len(), 2);
    assert_eq!(detail.items[0].line_total, Price::from_cents(9998).unwrap());
}

#[test]
fn test_checkout_of_empty_cart_creates_nothing() {
    let ctx = TestContext::new();
    let storefront = ctx.storefront();

    let result = storefront
        .checkout()
        .place_order(checkout_form("jane@example.com"));
    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    assert!(ctx.admin().orders().get_orders().is_empty());
}

#[test]
fn test_bad_email_keeps_cart_for_retry() {
    let ctx = TestContext::new();
    let storefront = ctx.storefront();
    storefront
        .cart()
        .add_item(product("p1", "Meditation cushion", 3200))
        .unwrap();

    let result = storefront.checkout().place_order(checkout_form("jane"));
    assert!(matches!(result, Err(CheckoutError::InvalidEmail(_))));
    assert_eq!(storefront.cart().summary().line_count, 1);

    storefront
        .checkout()
        .place_order(checkout_form("jane@example.com"))
        .unwrap();
    assert_eq!(ctx.admin().stats().total_orders, 1);
}

// =============================================================================
// Dashboard
// =============================================================================

#[test]
fn test_dashboard_after_several_checkouts() {
    let ctx = TestContext::new();
    let storefront = ctx.storefront();
    let admin = ctx.admin();

    let mut ids = Vec::new();
    for cents in [1000, 2000, 3000] {
        storefront
            .cart()
            .add_item(product("p1", "Singing bowl", cents))
            .unwrap();
        let order = storefront
            .checkout()
            .place_order(checkout_form("jane@example.com"))
            .unwrap();
        ids.push(order.id);
    }

    let stats = admin.stats();
    assert_eq!(stats.total_orders, 3);
    assert_eq!(stats.pending, 3);
    assert_eq!(stats.revenue, Price::from_cents(6000).unwrap());

    admin
        .orders()
        .update_status(&ids[0], OrderStatus::Completed)
        .unwrap();
    assert_eq!(admin.stats().pending, 2);

    let listing = admin.listing();
    assert_eq!(listing.recent[0].id, ids[2]);
    assert_eq!(listing.recent[2].id, ids[0]);
    assert_eq!(listing.recent[2].status, OrderStatus::Completed);
}

#[test]
fn test_delete_needs_confirmation() {
    let ctx = TestContext::new();
    let storefront = ctx.storefront();
    storefront
        .cart()
        .add_item(product("p1", "Singing bowl", 1500))
        .unwrap();
    let order = storefront
        .checkout()
        .place_order(checkout_form("jane@example.com"))
        .unwrap();

    let admin = ctx.admin();
    let mut changes = admin.orders().subscribe();

    assert!(!admin.orders().delete_order(&order.id, &NeverConfirm).unwrap());
    assert_eq!(admin.stats().total_orders, 1);

    assert!(admin.orders().delete_order(&order.id, &AlwaysConfirm).unwrap());
    assert_eq!(admin.stats().total_orders, 0);
    assert_eq!(admin.stats().revenue, Price::ZERO);
    assert_eq!(
        changes.try_recv().unwrap(),
        OrderChange::Deleted { id: order.id }
    );
}

#[test]
fn test_cart_remove_and_update_round_trip_through_files() {
    let ctx = TestContext::new();
    let cart_store = ctx.storefront();
    let cart = cart_store.cart();
    cart.add_item(product("p1", "Bamboo yoga mat", 1000)).unwrap();
    cart.add_item(product("p2", "Incense set", 500)).unwrap();

    assert!(cart.update_quantity(&ProductId::new("p2"), 3).unwrap());
    assert!(!cart.update_quantity(&ProductId::new("p2"), 0).unwrap());
    assert_eq!(cart.remove_item(&ProductId::new("p1")).unwrap(), 1);

    let reopened = ctx.storefront();
    let items = reopened.cart().get_cart();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 3);
    assert_eq!(reopened.cart().summary().total, Price::from_cents(1500).unwrap());
}
