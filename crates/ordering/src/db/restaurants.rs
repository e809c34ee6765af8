//! Restaurant and menu repository.
//!
//! Listing only ever returns active restaurants and available menu items.
//! Deactivated rows stay in the tables.

use rust_decimal::Decimal;

use food_delivery_core::{MenuItemId, Money, RestaurantId};

use super::{Gateway, GatewayError};
use crate::models::{MenuItem, Restaurant};

#[derive(Debug, sqlx::FromRow)]
struct RestaurantRow {
    restaurant_id: i32,
    name: String,
    address: String,
    phone: String,
    is_active: bool,
}

impl From<RestaurantRow> for Restaurant {
    fn from(row: RestaurantRow) -> Self {
        Self {
            id: RestaurantId::new(row.restaurant_id),
            name: row.name,
            address: row.address,
            phone: row.phone,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    menu_item_id: i32,
    restaurant_id: i32,
    name: String,
    price: Decimal,
    is_available: bool,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        Self {
            id: MenuItemId::new(row.menu_item_id),
            restaurant_id: RestaurantId::new(row.restaurant_id),
            name: row.name,
            price: Money::new(row.price),
            is_available: row.is_available,
        }
    }
}

/// Repository for the restaurant catalog.
pub struct RestaurantRepository<'a> {
    gateway: &'a Gateway,
}

impl<'a> RestaurantRepository<'a> {
    #[must_use]
    pub const fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// List every active restaurant.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Restaurant>, GatewayError> {
        self.gateway
            .scoped("list_restaurants", |tx| {
                Box::pin(async move {
                    let rows = sqlx::query_as::<_, RestaurantRow>(
                        r"
                        SELECT restaurant_id, name, address, phone, is_active
                        FROM restaurants
                        WHERE is_active = TRUE
                        ORDER BY restaurant_id
                        ",
                    )
                    .fetch_all(&mut **tx)
                    .await?;

                    Ok(rows.into_iter().map(Restaurant::from).collect::<Vec<_>>())
                })
            })
            .await
    }

    /// List the available menu items of one restaurant.
    ///
    /// An unknown restaurant yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the query fails.
    pub async fn list_menu_items(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<MenuItem>, GatewayError> {
        self.gateway
            .scoped("list_menu_items", move |tx| {
                Box::pin(async move {
                    let rows = sqlx::query_as::<_, MenuItemRow>(
                        r"
                        SELECT menu_item_id, restaurant_id, name, price, is_available
                        FROM menu_items
                        WHERE restaurant_id = $1 AND is_available = TRUE
                        ORDER BY menu_item_id
                        ",
                    )
                    .bind(restaurant_id)
                    .fetch_all(&mut **tx)
                    .await?;

                    Ok(rows.into_iter().map(MenuItem::from).collect::<Vec<_>>())
                })
            })
            .await
    }
}
