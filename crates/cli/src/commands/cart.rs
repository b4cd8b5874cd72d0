//! Cart and checkout commands.
//!
//! # Environment Variables
//!
//! - `ZENPLAY_DATA_DIR` - Directory holding the persisted cart and orders

use tracing::info;

use zenplay_core::{Price, Product, ProductId};
use zenplay_storefront::{CartStore, CheckoutForm, StorefrontConfig, StorefrontState};

use super::{CommandError, log_changes};

/// Open the storefront over the configured data directory.
pub fn open() -> Result<StorefrontState, CommandError> {
    let config = StorefrontConfig::from_env()?;
    info!(data_dir = %config.data_dir.display(), "Opening storefront");
    Ok(StorefrontState::open(&config)?)
}

/// Print every line and the cart totals.
pub fn show(state: &StorefrontState) {
    print_cart(state.cart());
}

/// Add one unit of a product.
#[allow(clippy::print_stdout)]
pub fn add(
    state: &StorefrontState,
    id: String,
    name: String,
    price: Price,
    image: String,
) -> Result<(), CommandError> {
    let cart = state.cart();
    let mut changes = cart.subscribe();

    let line = cart.add_item(Product {
        id: ProductId::new(id),
        name,
        price,
        image,
    })?;
    log_changes(&mut changes);

    println!("Added {} (quantity {})", line.name, line.quantity);
    print_cart(cart);
    Ok(())
}

/// Remove a product's line.
#[allow(clippy::print_stdout)]
pub fn remove(state: &StorefrontState, id: String) -> Result<(), CommandError> {
    let cart = state.cart();
    let mut changes = cart.subscribe();

    let removed = cart.remove_item(&ProductId::new(id))?;
    log_changes(&mut changes);

    if removed == 0 {
        println!("Nothing to remove");
    }
    print_cart(cart);
    Ok(())
}

/// Set a line's quantity.
#[allow(clippy::print_stdout)]
pub fn update(state: &StorefrontState, id: String, quantity: i64) -> Result<(), CommandError> {
    let cart = state.cart();
    let mut changes = cart.subscribe();

    let updated = cart.update_quantity(&ProductId::new(id), quantity)?;
    log_changes(&mut changes);

    if !updated {
        println!("Cart unchanged");
    }
    print_cart(cart);
    Ok(())
}

/// Empty the cart.
#[allow(clippy::print_stdout)]
pub fn clear(state: &StorefrontState) -> Result<(), CommandError> {
    let cart = state.cart();
    let mut changes = cart.subscribe();

    cart.clear()?;
    log_changes(&mut changes);

    println!("Cart cleared");
    Ok(())
}

/// Place an order for the current cart.
#[allow(clippy::print_stdout)]
pub fn checkout(state: &StorefrontState, form: CheckoutForm) -> Result<(), CommandError> {
    let mut changes = state.cart().subscribe();

    let order = state.checkout().place_order(form)?;
    log_changes(&mut changes);

    println!("Order {} placed on {}", order.id, order.date);
    println!("Total: ${}", order.total);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &CartStore) {
    let items = cart.get_cart();
    if items.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in &items {
        println!(
            "{:<12} {} x {}  ${}",
            item.id.as_str(),
            item.name,
            item.quantity,
            item.line_total()
        );
    }
    let summary = cart.summary();
    println!(
        "Items: {}  Lines: {}  Total: ${}",
        summary.item_count, summary.line_count, summary.total
    );
}
