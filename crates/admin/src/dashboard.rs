//! Dashboard views over the order collection.
//!
//! Everything here is derived from a freshly loaded `&[Order]` on each
//! refresh; nothing is cached between calls.

use zenplay_core::{Order, OrderId, OrderStatus, Price};

/// Number of orders shown in the dashboard's recent-orders table.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Format a price the way the dashboard shows money.
#[must_use]
pub fn format_price(price: Price) -> String {
    format!("${price}")
}

/// Headline figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_orders: usize,
    /// Sum of every order's total, regardless of status.
    pub revenue: Price,
    /// Orders whose status is exactly `Pending`.
    pub pending: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        Self {
            total_orders: orders.len(),
            revenue: orders.iter().map(|order| order.total).sum(),
            pending: orders.iter().filter(|order| order.is_pending()).count(),
        }
    }
}

/// One row of an order table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub id: OrderId,
    pub customer_name: String,
    pub date: String,
    pub total: Price,
    pub status: OrderStatus,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            customer_name: order.customer.full_name(),
            date: order.date.clone(),
            total: order.total,
            status: order.status,
        }
    }
}

/// Both order tables, newest first.
///
/// Orders carry only a display date, so "newest" means last appended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderListing {
    /// The first `limit` rows of `all`.
    pub recent: Vec<OrderRow>,
    pub all: Vec<OrderRow>,
}

impl OrderListing {
    #[must_use]
    pub fn from_orders(orders: &[Order], limit: usize) -> Self {
        let all: Vec<OrderRow> = orders.iter().rev().map(OrderRow::from).collect();
        let recent = all.iter().take(limit).cloned().collect();
        Self { recent, all }
    }
}

/// A purchased line with its computed total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineView {
    pub name: String,
    pub quantity: u32,
    pub line_total: Price,
}

/// Everything the order detail modal shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetailView {
    pub id: OrderId,
    pub date: String,
    pub status: OrderStatus,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    /// `"<address>, <city>"`
    pub address: String,
    /// `N/A` when the customer left no notes.
    pub notes: String,
    pub items: Vec<OrderLineView>,
    pub total: Price,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        let customer = &order.customer;
        Self {
            id: order.id.clone(),
            date: order.date.clone(),
            status: order.status,
            customer_name: customer.full_name(),
            email: customer.email.to_string(),
            phone: customer.phone.clone(),
            address: format!("{}, {}", customer.address, customer.city),
            notes: customer.notes_or_na().to_owned(),
            items: order
                .items
                .iter()
                .map(|item| OrderLineView {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    line_total: item.line_total(),
                })
                .collect(),
            total: order.total,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use zenplay_core::{Customer, Email, OrderItem};

    use super::*;

    fn order(id: &str, cents: i64, status: OrderStatus) -> Order {
        let price = Price::from_cents(cents).unwrap();
        Order {
            id: OrderId::new(id),
            customer: Customer {
                first_name: "Brian".to_owned(),
                last_name: "Kamau".to_owned(),
                email: Email::parse("brian@example.com").unwrap(),
                phone: "0722000000".to_owned(),
                address: "7 Ngong Road".to_owned(),
                city: "Nairobi".to_owned(),
                notes: None,
            },
            date: "2024-06-02 09:15".to_owned(),
            status,
            items: vec![OrderItem {
                name: "Meditation cushion".to_owned(),
                quantity: 1,
                price,
            }],
            total: price,
        }
    }

    #[test]
    fn test_stats_of_empty_collection_are_zero() {
        assert_eq!(DashboardStats::from_orders(&[]), DashboardStats::default());
        assert_eq!(format_price(DashboardStats::default().revenue), "$0.00");
    }

    #[test]
    fn test_stats() {
        let orders = [
            order("o1", 1000, OrderStatus::Pending),
            order("o2", 2550, OrderStatus::Completed),
            order("o3", 450, OrderStatus::Pending),
            order("o4", 100, OrderStatus::Processed),
        ];
        let stats = DashboardStats::from_orders(&orders);
        assert_eq!(stats.total_orders, 4);
        assert_eq!(stats.revenue, Price::from_cents(4100).unwrap());
        assert_eq!(stats.pending, 2);
    }

    #[test]
    fn test_listing_is_newest_first_and_capped() {
        let orders: Vec<_> = (1..=7)
            .map(|n| order(&format!("o{n}"), 100, OrderStatus::Pending))
            .collect();
        let listing = OrderListing::from_orders(&orders, DEFAULT_RECENT_LIMIT);

        let recent: Vec<_> = listing.recent.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(recent, ["o7", "o6", "o5", "o4", "o3"]);
        assert_eq!(listing.all.len(), 7);
        assert_eq!(listing.all[6].id.as_str(), "o1");
    }

    #[test]
    fn test_listing_shorter_than_limit() {
        let orders = [order("o1", 100, OrderStatus::Pending)];
        let listing = OrderListing::from_orders(&orders, DEFAULT_RECENT_LIMIT);
        assert_eq!(listing.recent, listing.all);
        assert_eq!(listing.recent[0].customer_name, "Brian Kamau");
    }

    #[test]
    fn test_detail_view() {
        let mut order = order("o1", 1250, OrderStatus::Processed);
        order.items[0].quantity = 3;
        order.total = Price::from_cents(3750).unwrap();

        let detail = OrderDetailView::from(&order);
        assert_eq!(detail.address, "7 Ngong Road, Nairobi");
        assert_eq!(detail.notes, "N/A");
        assert_eq!(detail.items[0].line_total, Price::from_cents(3750).unwrap());
        assert_eq!(format_price(detail.total), "$37.50");

        order.customer.notes = Some("Leave at the gate".to_owned());
        assert_eq!(OrderDetailView::from(&order).notes, "Leave at the gate");
    }
}
