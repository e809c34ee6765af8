//! Order repository.
//!
//! Placing an order writes the order row and all of its line items in one
//! scoped acquisition: either every row commits or none does.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use food_delivery_core::{CustomerId, MenuItemId, Money, OrderId, OrderItemId, RestaurantId};

use super::{Gateway, GatewayError};
use crate::models::{CustomerOrder, NewOrder, Order, OrderItem};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    order_id: i32,
    customer_id: i32,
    restaurant_id: i32,
    total_amount: Decimal,
    order_date: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.order_id),
            customer_id: CustomerId::new(row.customer_id),
            restaurant_id: RestaurantId::new(row.restaurant_id),
            total_amount: Money::new(row.total_amount),
            order_date: row.order_date,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CustomerOrderRow {
    order_id: i32,
    customer_id: i32,
    restaurant_id: i32,
    total_amount: Decimal,
    order_date: DateTime<Utc>,
    restaurant_name: String,
    delivery_status: Option<String>,
    delivery_person_name: Option<String>,
}

impl From<CustomerOrderRow> for CustomerOrder {
    fn from(row: CustomerOrderRow) -> Self {
        Self {
            order: Order {
                id: OrderId::new(row.order_id),
                customer_id: CustomerId::new(row.customer_id),
                restaurant_id: RestaurantId::new(row.restaurant_id),
                total_amount: Money::new(row.total_amount),
                order_date: row.order_date,
            },
            restaurant_name: row.restaurant_name,
            delivery_status: row.delivery_status,
            delivery_person_name: row.delivery_person_name,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    order_item_id: i32,
    order_id: i32,
    menu_item_id: i32,
    quantity: i32,
    item_price: Decimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.order_item_id),
            order_id: OrderId::new(row.order_id),
            menu_item_id: MenuItemId::new(row.menu_item_id),
            quantity: row.quantity,
            item_price: Money::new(row.item_price),
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for orders and their line items.
pub struct OrderRepository<'a> {
    gateway: &'a Gateway,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Place an order: insert the order row, then one `order_items` row per
    /// line item in input order, all in one transaction.
    ///
    /// An empty item list is accepted. `total_amount` is stored as given.
    ///
    /// # Errors
    ///
    /// - `GatewayError::InvalidLineItem` if an item has a quantity below one
    ///   or a negative price
    /// - `GatewayError::Statement` if any insert fails (for example an unknown
    ///   customer, restaurant or menu item)
    ///
    /// In every error case nothing from this call is persisted.
    pub async fn create(&self, order: &NewOrder) -> Result<OrderId, GatewayError> {
        let order = order.clone();

        self.gateway
            .scoped("place_order", move |tx| {
                Box::pin(async move {
                    let order_id = sqlx::query_scalar::<_, OrderId>(
                        r"
                        INSERT INTO orders (customer_id, restaurant_id, total_amount)
                        VALUES ($1, $2, $3)
                        RETURNING order_id
                        ",
                    )
                    .bind(order.customer_id)
                    .bind(order.restaurant_id)
                    .bind(order.total_amount)
                    .fetch_one(&mut **tx)
                    .await?;

                    for (index, item) in order.items.iter().enumerate() {
                        item.validate()
                            .map_err(|reason| GatewayError::InvalidLineItem { index, reason })?;

                        sqlx::query(
                            r"
                            INSERT INTO order_items (order_id, menu_item_id, quantity, item_price)
                            VALUES ($1, $2, $3, $4)
                            ",
                        )
                        .bind(order_id)
                        .bind(item.menu_item_id)
                        .bind(item.quantity)
                        .bind(item.price)
                        .execute(&mut **tx)
                        .await?;
                    }

                    tracing::debug!(
                        order_id = %order_id,
                        items = order.items.len(),
                        "order rows written"
                    );

                    Ok(order_id)
                })
            })
            .await
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the query fails.
    pub async fn get(&self, order_id: OrderId) -> Result<Option<Order>, GatewayError> {
        self.gateway
            .scoped("get_order", move |tx| {
                Box::pin(async move {
                    let row = sqlx::query_as::<_, OrderRow>(
                        r"
                        SELECT order_id, customer_id, restaurant_id, total_amount, order_date
                        FROM orders
                        WHERE order_id = $1
                        ",
                    )
                    .bind(order_id)
                    .fetch_optional(&mut **tx)
                    .await?;

                    Ok(row.map(Order::from))
                })
            })
            .await
    }

    /// List an order's line items in the order they were inserted.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the query fails.
    pub async fn list_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, GatewayError> {
        self.gateway
            .scoped("list_order_items", move |tx| {
                Box::pin(async move {
                    let rows = sqlx::query_as::<_, OrderItemRow>(
                        r"
                        SELECT order_item_id, order_id, menu_item_id, quantity, item_price
                        FROM order_items
                        WHERE order_id = $1
                        ORDER BY order_item_id
                        ",
                    )
                    .bind(order_id)
                    .fetch_all(&mut **tx)
                    .await?;

                    Ok(rows.into_iter().map(OrderItem::from).collect::<Vec<_>>())
                })
            })
            .await
    }

    /// List a customer's orders, newest first, with restaurant name and any
    /// delivery status and delivery person.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the query fails.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<CustomerOrder>, GatewayError> {
        self.gateway
            .scoped("list_customer_orders", move |tx| {
                Box::pin(async move {
                    let rows = sqlx::query_as::<_, CustomerOrderRow>(
                        r"
                        SELECT o.order_id, o.customer_id, o.restaurant_id,
                               o.total_amount, o.order_date,
                               r.name AS restaurant_name,
                               d.status AS delivery_status,
                               dp.name AS delivery_person_name
                        FROM orders o
                        JOIN restaurants r ON o.restaurant_id = r.restaurant_id
                        LEFT JOIN deliveries d ON o.order_id = d.order_id
                        LEFT JOIN delivery_persons dp
                               ON d.delivery_person_id = dp.delivery_person_id
                        WHERE o.customer_id = $1
                        ORDER BY o.order_date DESC, o.order_id DESC, d.delivery_id
                        ",
                    )
                    .bind(customer_id)
                    .fetch_all(&mut **tx)
                    .await?;

                    Ok(rows.into_iter().map(CustomerOrder::from).collect::<Vec<_>>())
                })
            })
            .await
    }
}
