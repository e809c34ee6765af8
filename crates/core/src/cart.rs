//! Shopping cart built up before checkout.
//!
//! A cart holds items from a single restaurant, because an order belongs to
//! exactly one restaurant. Adding the same menu item twice bumps its
//! quantity, so checkout produces one line item per distinct menu item.
//!
//! Quantities are bounded by [`CartItem::MAX_QUANTITY`] and totals are
//! computed with checked arithmetic, so a cart never produces line items
//! that disagree with its total.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{LineItem, MenuItemId, Money, MoneyError, RestaurantId};

/// Errors from cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The cart already holds items from a different restaurant.
    #[error("cart holds items from restaurant {cart}, cannot add from restaurant {item}")]
    RestaurantMismatch {
        cart: RestaurantId,
        item: RestaurantId,
    },

    #[error("quantity must be at least 1")]
    ZeroQuantity,

    #[error("price cannot be negative")]
    NegativePrice,

    #[error("quantity cannot exceed {max}")]
    QuantityTooLarge { max: u32 },

    /// The cart total would not fit in a decimal amount.
    #[error(transparent)]
    Amount(#[from] MoneyError),
}

/// A menu item sitting in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub menu_item_id: MenuItemId,
    /// Display name at the time the item was added.
    pub name: String,
    /// Unit price captured when the item was first added.
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartItem {
    /// Largest quantity an order line can store.
    pub const MAX_QUANTITY: u32 = i32::MAX.unsigned_abs();

    #[must_use]
    pub fn new(menu_item_id: MenuItemId, name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            menu_item_id,
            name: name.into(),
            unit_price,
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the subtotal does not fit.
    pub fn subtotal(&self) -> Result<Money, MoneyError> {
        self.unit_price.times(self.quantity)
    }
}

/// A customer's cart for one restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    restaurant_id: Option<RestaurantId>,
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restaurant the cart is bound to, if it holds anything.
    #[must_use]
    pub const fn restaurant_id(&self) -> Option<RestaurantId> {
        self.restaurant_id
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct menu items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Add an item from `restaurant_id`.
    ///
    /// If the menu item is already in the cart its quantity grows and the
    /// originally captured price is kept.
    ///
    /// # Errors
    ///
    /// - [`CartError::RestaurantMismatch`] if the cart is bound to another restaurant
    /// - [`CartError::ZeroQuantity`] if `item.quantity` is zero
    /// - [`CartError::NegativePrice`] if `item.unit_price` is below zero
    /// - [`CartError::QuantityTooLarge`] if the merged quantity would exceed
    ///   [`CartItem::MAX_QUANTITY`]
    /// - [`CartError::Amount`] if the cart total would overflow
    ///
    /// On error the cart is left unchanged.
    pub fn add(&mut self, restaurant_id: RestaurantId, item: CartItem) -> Result<(), CartError> {
        if item.quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        if item.unit_price.is_negative() {
            return Err(CartError::NegativePrice);
        }
        if let Some(cart) = self.restaurant_id
            && cart != restaurant_id
        {
            return Err(CartError::RestaurantMismatch {
                cart,
                item: restaurant_id,
            });
        }

        let mut items = self.items.clone();
        match items
            .iter_mut()
            .find(|existing| existing.menu_item_id == item.menu_item_id)
        {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => items.push(item),
        }
        if items.iter().any(|line| line.quantity > CartItem::MAX_QUANTITY) {
            return Err(CartError::QuantityTooLarge {
                max: CartItem::MAX_QUANTITY,
            });
        }
        total_of(&items)?;

        self.restaurant_id = Some(restaurant_id);
        self.items = items;
        Ok(())
    }

    /// Remove a menu item entirely. An emptied cart is unbound from its
    /// restaurant.
    pub fn remove(&mut self, menu_item_id: MenuItemId) -> Option<CartItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.menu_item_id == menu_item_id)?;
        let removed = self.items.remove(index);
        if self.items.is_empty() {
            self.restaurant_id = None;
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.restaurant_id = None;
    }

    /// Sum of every item's subtotal.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the total does not fit.
    pub fn total(&self) -> Result<Money, MoneyError> {
        total_of(&self.items)
    }

    /// Line items for order placement, in the order items were first added.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityTooLarge`] if a quantity does not fit an
    /// order line, which only a cart built outside [`Cart::add`] can hold.
    pub fn line_items(&self) -> Result<Vec<LineItem>, CartError> {
        self.items
            .iter()
            .map(|item| {
                let quantity = i32::try_from(item.quantity).map_err(|_| {
                    CartError::QuantityTooLarge {
                        max: CartItem::MAX_QUANTITY,
                    }
                })?;
                Ok(LineItem::new(item.menu_item_id, quantity, item.unit_price))
            })
            .collect()
    }
}

fn total_of(items: &[CartItem]) -> Result<Money, MoneyError> {
    items.iter().try_fold(Money::ZERO, |total, item| {
        total.checked_add(item.subtotal()?)
    })
}
