//! Order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use food_delivery_core::{CustomerId, LineItem, MenuItemId, Money, OrderId, OrderItemId, RestaurantId};

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    /// Amount supplied by the caller. Not reconciled against the items.
    pub total_amount: Money,
    /// Set by the store when the order row is inserted.
    pub order_date: DateTime<Utc>,
}

/// Input for placing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    pub total_amount: Money,
    /// Persisted one row per entry, in this order. May be empty.
    pub items: Vec<LineItem>,
}

/// One persisted line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub menu_item_id: MenuItemId,
    pub quantity: i32,
    /// Unit price captured at order time.
    pub item_price: Money,
}

/// An order as shown in a customer's order history.
///
/// Delivery fields are `None` until a delivery has been assigned. An order
/// with several delivery assignments appears once per assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerOrder {
    #[serde(flatten)]
    pub order: Order,
    pub restaurant_name: String,
    pub delivery_status: Option<String>,
    pub delivery_person_name: Option<String>,
}
