//! Order line items.

use serde::{Deserialize, Serialize};

use super::{MenuItemId, Money};

/// One requested menu item in an order.
///
/// `price` is the unit price captured when the item was chosen. It is
/// persisted as-is so later menu price changes never touch placed orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub menu_item_id: MenuItemId,
    pub quantity: i32,
    pub price: Money,
}

impl LineItem {
    #[must_use]
    pub const fn new(menu_item_id: MenuItemId, quantity: i32, price: Money) -> Self {
        Self {
            menu_item_id,
            quantity,
            price,
        }
    }

    /// Check the item is fit to persist, returning a reason if not.
    ///
    /// # Errors
    ///
    /// Returns a description when the quantity is below one or the price is
    /// negative.
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity < 1 {
            return Err(format!("quantity must be at least 1 (got {})", self.quantity));
        }
        if self.price.is_negative() {
            return Err(format!("price cannot be negative (got {})", self.price));
        }
        Ok(())
    }
}
