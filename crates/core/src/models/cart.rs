//! Cart line items.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product as offered on a product page, before it enters the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Image URL or path shown next to the line item.
    #[serde(default)]
    pub image: String,
}

/// One line in the shopping cart.
///
/// A cart holds at most one `CartItem` per [`ProductId`], and `quantity` is
/// always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    /// Price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

impl From<Product> for CartItem {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            quantity: 1,
        }
    }
}
