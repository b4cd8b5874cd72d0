//! Order management commands.
//!
//! Every command here except `open` expects a logged-in admin session.

use std::io::{self, BufRead, Write};

use tracing::info;

use zenplay_admin::dashboard::format_price;
use zenplay_admin::orders::Confirm;
use zenplay_admin::{AdminConfig, AdminState, AlwaysConfirm};
use zenplay_core::{OrderId, OrderStatus};

use super::{CommandError, log_changes};

/// Asks on the terminal before deleting.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    #[allow(clippy::print_stdout)]
    fn confirm_delete(&self, id: &OrderId) -> bool {
        print!("Are you sure you want to delete order {id}? [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Open the admin state over the configured data directory.
pub fn open() -> Result<AdminState, CommandError> {
    let config = AdminConfig::from_env()?;
    info!(data_dir = %config.data_dir.display(), "Opening order store");
    Ok(AdminState::open(config)?)
}

fn require_login(state: &AdminState) -> Result<(), CommandError> {
    if state.gate().is_logged_in() {
        Ok(())
    } else {
        Err(CommandError::NotLoggedIn)
    }
}

/// Print the recent (or every) order, newest first.
#[allow(clippy::print_stdout)]
pub fn list(state: &AdminState, all: bool) -> Result<(), CommandError> {
    require_login(state)?;
    let listing = state.listing();
    let rows = if all { listing.all } else { listing.recent };
    if rows.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }

    for row in rows {
        println!(
            "{:<14} {:<24} {:<16} {:>10}  {}",
            row.id.as_str(),
            row.customer_name,
            row.date,
            format_price(row.total),
            row.status
        );
    }
    Ok(())
}

/// Print one order in detail.
#[allow(clippy::print_stdout)]
pub fn show(state: &AdminState, id: String) -> Result<(), CommandError> {
    require_login(state)?;
    let id = OrderId::new(id);
    let detail = state
        .order_detail(&id)
        .ok_or_else(|| CommandError::OrderNotFound(id.into_inner()))?;

    println!("Order {} ({})", detail.id, detail.status);
    println!("Date:    {}", detail.date);
    println!("Name:    {}", detail.customer_name);
    println!("Email:   {}", detail.email);
    println!("Phone:   {}", detail.phone);
    println!("Address: {}", detail.address);
    println!("Notes:   {}", detail.notes);
    println!();
    for line in &detail.items {
        println!(
            "  {} x {}  {}",
            line.name,
            line.quantity,
            format_price(line.line_total)
        );
    }
    println!("Total: {}", format_price(detail.total));
    Ok(())
}

/// Print the dashboard figures.
#[allow(clippy::print_stdout)]
pub fn stats(state: &AdminState) -> Result<(), CommandError> {
    require_login(state)?;
    let stats = state.stats();
    println!("Total orders: {}", stats.total_orders);
    println!("Revenue:      {}", format_price(stats.revenue));
    println!("Pending:      {}", stats.pending);
    Ok(())
}

/// Overwrite an order's status.
#[allow(clippy::print_stdout)]
pub fn set_status(state: &AdminState, id: String, status: OrderStatus) -> Result<(), CommandError> {
    require_login(state)?;
    let orders = state.orders();
    let mut changes = orders.subscribe();

    let id = OrderId::new(id);
    let updated = orders.update_status(&id, status)?;
    log_changes(&mut changes);

    if updated {
        println!("Order {id} is now {status}");
    } else {
        println!("No order {id}; nothing changed");
    }
    Ok(())
}

/// Delete an order, asking first unless `yes`.
#[allow(clippy::print_stdout)]
pub fn delete(state: &AdminState, id: String, yes: bool) -> Result<(), CommandError> {
    require_login(state)?;
    let orders = state.orders();
    let mut changes = orders.subscribe();

    let id = OrderId::new(id);
    let confirm: &dyn Confirm = if yes { &AlwaysConfirm } else { &StdinConfirm };
    let deleted = orders.delete_order(&id, confirm)?;
    log_changes(&mut changes);

    if deleted {
        println!("Deleted order {id}");
    } else {
        println!("Order {id} kept");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
    }
}
