//! Delivery domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use food_delivery_core::{DeliveryId, DeliveryPersonId, DeliveryStatus, OrderId};

/// A delivery assignment for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub id: DeliveryId,
    pub order_id: OrderId,
    pub delivery_person_id: DeliveryPersonId,
    pub status: DeliveryStatus,
    /// Stamped when the status becomes `delivered`. Later status changes
    /// leave it as it was.
    pub delivered_time: Option<DateTime<Utc>>,
}
