//! Order records managed from the admin dashboard.

use serde::{Deserialize, Serialize};

use crate::types::{Email, OrderId, OrderStatus, Price};

/// Buyer details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Customer {
    /// `"First Last"`, trimmed when either part is blank.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Notes for display; blank or missing notes render as `N/A`.
    #[must_use]
    pub fn notes_or_na(&self) -> &str {
        match self.notes.as_deref() {
            Some(notes) if !notes.trim().is_empty() => notes,
            _ => "N/A",
        }
    }
}

/// A purchased line, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub price: Price,
}

impl OrderItem {
    /// Price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A finalized purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    pub date: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub total: Price,
}

impl Order {
    /// Whether the order is still waiting to be processed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }
}
