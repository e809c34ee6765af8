//! Delivery repository.

use chrono::{DateTime, Utc};

use food_delivery_core::{DeliveryId, DeliveryPersonId, DeliveryStatus, OrderId};

use super::{Gateway, GatewayError};
use crate::models::Delivery;

#[derive(Debug, sqlx::FromRow)]
struct DeliveryRow {
    delivery_id: i32,
    order_id: i32,
    delivery_person_id: i32,
    status: String,
    delivered_time: Option<DateTime<Utc>>,
}

impl From<DeliveryRow> for Delivery {
    fn from(row: DeliveryRow) -> Self {
        Self {
            id: DeliveryId::new(row.delivery_id),
            order_id: OrderId::new(row.order_id),
            delivery_person_id: DeliveryPersonId::new(row.delivery_person_id),
            status: DeliveryStatus::from(row.status),
            delivered_time: row.delivered_time,
        }
    }
}

/// Repository for delivery assignments and status tracking.
pub struct DeliveryRepository<'a> {
    gateway: &'a Gateway,
}

impl<'a> DeliveryRepository<'a> {
    #[must_use]
    pub const fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Assign a delivery person to an order.
    ///
    /// The new delivery starts out `pending` with no delivered time. An order
    /// may be assigned more than once; every call inserts a new row.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the insert fails, for example
    /// when the order or delivery person does not exist.
    pub async fn assign(
        &self,
        order_id: OrderId,
        delivery_person_id: DeliveryPersonId,
    ) -> Result<DeliveryId, GatewayError> {
        self.gateway
            .scoped("assign_delivery", move |tx| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, DeliveryId>(
                        r"
                        INSERT INTO deliveries (order_id, delivery_person_id, status)
                        VALUES ($1, $2, $3)
                        RETURNING delivery_id
                        ",
                    )
                    .bind(order_id)
                    .bind(delivery_person_id)
                    .bind(DeliveryStatus::PENDING)
                    .fetch_one(&mut **tx)
                    .await?;

                    Ok(id)
                })
            })
            .await
    }

    /// Set a delivery's status.
    ///
    /// When the new status is exactly `delivered` the delivered time is set
    /// to the database's current timestamp. Any other status leaves the
    /// delivered time untouched, so a value once stamped is never cleared.
    ///
    /// Returns the number of rows changed: zero for an unknown delivery.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the update fails.
    pub async fn update_status(
        &self,
        delivery_id: DeliveryId,
        status: &DeliveryStatus,
    ) -> Result<u64, GatewayError> {
        let status = status.clone();

        self.gateway
            .scoped("update_delivery_status", move |tx| {
                Box::pin(async move {
                    let result = sqlx::query(
                        r"
                        UPDATE deliveries
                        SET status = $1,
                            delivered_time = CASE WHEN $2 THEN CURRENT_TIMESTAMP
                                                  ELSE delivered_time END
                        WHERE delivery_id = $3
                        ",
                    )
                    .bind(status.as_str())
                    .bind(status.is_delivered())
                    .bind(delivery_id)
                    .execute(&mut **tx)
                    .await?;

                    Ok(result.rows_affected())
                })
            })
            .await
    }

    /// Get a delivery by id.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the query fails.
    pub async fn get(&self, delivery_id: DeliveryId) -> Result<Option<Delivery>, GatewayError> {
        self.gateway
            .scoped("get_delivery", move |tx| {
                Box::pin(async move {
                    let row = sqlx::query_as::<_, DeliveryRow>(
                        r"
                        SELECT delivery_id, order_id, delivery_person_id, status, delivered_time
                        FROM deliveries
                        WHERE delivery_id = $1
                        ",
                    )
                    .bind(delivery_id)
                    .fetch_optional(&mut **tx)
                    .await?;

                    Ok(row.map(Delivery::from))
                })
            })
            .await
    }
}
