//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Error returned when a string is not one of the [`OrderStatus`] values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid order status: {0} (expected Pending, Processed or Completed)")]
pub struct OrderStatusError(pub String);

/// Order processing status.
///
/// Serialized as the literal strings `"Pending"`, `"Processed"` and
/// `"Completed"` (case-sensitive). Any status may be set from any other; no
/// transition graph is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Newly placed, awaiting processing.
    #[default]
    Pending,
    /// Picked up by an administrator.
    Processed,
    /// Fulfilled.
    Completed,
}

impl OrderStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Processed, Self::Completed];

    /// The wire/display name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processed => "Processed",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processed" => Ok(Self::Processed),
            "Completed" => Ok(Self::Completed),
            _ => Err(OrderStatusError(s.to_owned())),
        }
    }
}
