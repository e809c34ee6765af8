//! Restaurant and menu listing commands.

use food_delivery_core::RestaurantId;
use food_delivery_ordering::OrderingService;

use super::{CommandError, print_json};

/// Print all active restaurants.
///
/// # Errors
///
/// Returns an error if the listing fails.
pub async fn restaurants(service: &OrderingService) -> Result<(), CommandError> {
    let restaurants = service.list_restaurants().await?;
    tracing::debug!(count = restaurants.len(), "restaurants listed");
    print_json(&restaurants)
}

/// Print the available menu of one restaurant.
///
/// # Errors
///
/// Returns an error if the listing fails.
pub async fn menu(service: &OrderingService, restaurant_id: RestaurantId) -> Result<(), CommandError> {
    let items = service.list_menu_items(restaurant_id).await?;
    print_json(&items)
}
