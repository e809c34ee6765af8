//! Payment repository.
//!
//! Payments are recorded as given. The amount is not checked against the
//! order total and an order may be paid more than once.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use food_delivery_core::{Money, OrderId, PaymentId};

use super::{Gateway, GatewayError};
use crate::models::{NewPayment, Payment};

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    payment_id: i32,
    order_id: i32,
    amount: Decimal,
    payment_method: String,
    payment_date: DateTime<Utc>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Self {
            id: PaymentId::new(row.payment_id),
            order_id: OrderId::new(row.order_id),
            amount: Money::new(row.amount),
            payment_method: row.payment_method,
            payment_date: row.payment_date,
        }
    }
}

pub struct PaymentRepository<'a> {
    gateway: &'a Gateway,
}

impl<'a> PaymentRepository<'a> {
    #[must_use]
    pub const fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Record a payment against an order.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the insert fails, for example on
    /// an unknown order.
    pub async fn create(&self, input: &NewPayment) -> Result<PaymentId, GatewayError> {
        let input = input.clone();

        self.gateway
            .scoped("process_payment", move |tx| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, PaymentId>(
                        r"
                        INSERT INTO payments (order_id, amount, payment_method)
                        VALUES ($1, $2, $3)
                        RETURNING payment_id
                        ",
                    )
                    .bind(input.order_id)
                    .bind(input.amount)
                    .bind(&input.payment_method)
                    .fetch_one(&mut **tx)
                    .await?;

                    Ok(id)
                })
            })
            .await
    }

    /// List the payments recorded for an order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Statement` if the query fails.
    pub async fn list_for_order(&self, order_id: OrderId) -> Result<Vec<Payment>, GatewayError> {
        self.gateway
            .scoped("list_payments", move |tx| {
                Box::pin(async move {
                    let rows = sqlx::query_as::<_, PaymentRow>(
                        r"
                        SELECT payment_id, order_id, amount, payment_method, payment_date
                        FROM payments
                        WHERE order_id = $1
                        ORDER BY payment_id
                        ",
                    )
                    .bind(order_id)
                    .fetch_all(&mut **tx)
                    .await?;

                    Ok(rows.into_iter().map(Payment::from).collect::<Vec<_>>())
                })
            })
            .await
    }
}
