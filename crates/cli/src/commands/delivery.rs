//! Delivery commands.

use serde_json::json;

use food_delivery_core::{DeliveryId, DeliveryPersonId, DeliveryStatus, OrderId};
use food_delivery_ordering::OrderingService;

use super::{CommandError, print_json};

/// Assign a delivery person to an order and print the delivery id.
///
/// # Errors
///
/// Returns an error if the order or delivery person does not exist.
pub async fn assign(
    service: &OrderingService,
    order_id: OrderId,
    person_id: DeliveryPersonId,
) -> Result<(), CommandError> {
    let id = service.assign_delivery(order_id, person_id).await?;
    print_json(&json!({ "delivery_id": id }))
}

/// Set a delivery's status and print how many rows changed.
///
/// # Errors
///
/// Returns `CommandError::NotFound` if no delivery has `delivery_id`.
pub async fn set_status(
    service: &OrderingService,
    delivery_id: DeliveryId,
    status: DeliveryStatus,
) -> Result<(), CommandError> {
    let updated = service.update_delivery_status(delivery_id, &status).await?;
    if updated == 0 {
        return Err(CommandError::NotFound(format!("delivery {delivery_id}")));
    }

    print_json(&json!({ "delivery_id": delivery_id, "status": status, "updated": updated }))
}

/// Print one delivery.
///
/// # Errors
///
/// Returns `CommandError::NotFound` if no delivery has `delivery_id`.
pub async fn show(service: &OrderingService, delivery_id: DeliveryId) -> Result<(), CommandError> {
    let delivery = service
        .get_delivery(delivery_id)
        .await?
        .ok_or_else(|| CommandError::NotFound(format!("delivery {delivery_id}")))?;

    print_json(&delivery)
}
