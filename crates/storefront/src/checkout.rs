//! Checkout: turn the cart into a pending order.
//!
//! The admin dashboard expects every order appended to the order collection
//! to carry a fresh unique id and the `Pending` status. Checkout is the only
//! writer that creates orders, so it enforces both here.

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use zenplay_core::{CartItem, Customer, Email, Order, OrderId, OrderItem, OrderStatus, Price};
use zenplay_storage::{CollectionRepository, SharedStorage, keys};

use crate::cart::{CartStore, CartSummary};
use crate::error::CheckoutError;

/// Format of `Order::date`.
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// How many fresh ids to try before giving up.
const MAX_ID_ATTEMPTS: usize = 8;

/// Customer details as entered on the checkout page.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub notes: Option<String>,
}

impl CheckoutForm {
    /// Validate the form into a [`Customer`].
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingField` for a blank required field and
    /// `CheckoutError::InvalidEmail` if the email does not parse.
    pub fn into_customer(self) -> Result<Customer, CheckoutError> {
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
        ];
        if let Some(&(field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CheckoutError::MissingField(field));
        }
        let email = Email::parse(&self.email)?;

        Ok(Customer {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email,
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            notes: self
                .notes
                .map(|notes| notes.trim().to_owned())
                .filter(|notes| !notes.is_empty()),
        })
    }
}

/// Places orders from the cart.
#[derive(Debug, Clone)]
pub struct Checkout {
    cart: CartStore,
    orders: CollectionRepository<Order>,
}

impl Checkout {
    /// Create a checkout that reads `cart` and appends to the order
    /// collection on `storage`.
    #[must_use]
    pub fn new(cart: CartStore, storage: SharedStorage) -> Self {
        Self {
            cart,
            orders: CollectionRepository::new(storage, keys::ORDERS),
        }
    }

    /// Place an order dated now.
    ///
    /// # Errors
    ///
    /// See [`Checkout::place_order_at`].
    pub fn place_order(&self, form: CheckoutForm) -> Result<Order, CheckoutError> {
        self.place_order_at(form, Utc::now())
    }

    /// Place an order for the current cart, dated `placed_at`.
    ///
    /// On success the order has been appended to the order collection and the
    /// cart has been emptied.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no lines,
    /// `CheckoutError::TotalTooLarge` if the total saturated, a validation
    /// error if the form is incomplete, or a storage error if the order or
    /// cart cannot be written.
    #[instrument(skip(self, form))]
    pub fn place_order_at(
        &self,
        form: CheckoutForm,
        placed_at: DateTime<Utc>,
    ) -> Result<Order, CheckoutError> {
        let lines = self.cart.get_cart();
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let customer = form.into_customer()?;
        let total = CartSummary::from_items(&lines).total;
        if total == Price::MAX {
            return Err(CheckoutError::TotalTooLarge);
        }

        let mut orders = self.orders.load();
        let id = fresh_order_id(&orders)?;
        let order = Order {
            id,
            customer,
            date: placed_at.format(ORDER_DATE_FORMAT).to_string(),
            status: OrderStatus::Pending,
            items: lines.iter().map(order_item).collect(),
            total,
        };
        orders.push(order.clone());
        self.orders.save(&orders)?;

        info!(
            order_id = %order.id,
            customer = %order.customer.email.masked(),
            total = %order.total,
            "Order placed"
        );

        self.cart.clear().inspect_err(|e| {
            warn!(order_id = %order.id, error = %e, "Order saved but cart not cleared");
        })?;
        Ok(order)
    }
}

fn order_item(line: &CartItem) -> OrderItem {
    OrderItem {
        name: line.name.clone(),
        quantity: line.quantity,
        price: line.price,
    }
}

/// `ORD-` followed by eight upper-case hex digits, unused in `existing`.
fn fresh_order_id(existing: &[Order]) -> Result<OrderId, CheckoutError> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(8)
            .collect::<String>()
            .to_uppercase();
        let id = OrderId::new(format!("ORD-{suffix}"));
        if existing.iter().all(|order| order.id != id) {
            return Ok(id);
        }
    }
    Err(CheckoutError::IdExhausted)
}
