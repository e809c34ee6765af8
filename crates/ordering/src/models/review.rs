//! Review and payment domain types.
//!
//! Neither is deduplicated: an order may collect any number of reviews and
//! payments.

use chrono::{DateTime, Utc};
use serde::Serialize;

use food_delivery_core::{CustomerId, Money, OrderId, PaymentId, RestaurantId, ReviewId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    /// Stored as given; range is not checked here.
    pub rating: i32,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub id: ReviewId,
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    pub rating: i32,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub order_id: OrderId,
    pub amount: Money,
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub amount: Money,
    pub payment_method: String,
    pub payment_date: DateTime<Utc>,
}
