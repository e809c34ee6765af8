//! Restaurant and menu domain types.

use serde::Serialize;

use food_delivery_core::{CartItem, MenuItemId, Money, RestaurantId};

/// A restaurant. Only active restaurants are ever listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub is_active: bool,
}

/// A menu entry. Only available items are ever listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub price: Money,
    pub is_available: bool,
}

/// A cart line for one unit of this item at its listed price.
impl From<&MenuItem> for CartItem {
    fn from(item: &MenuItem) -> Self {
        Self::new(item.id, item.name.clone(), item.price)
    }
}
